pub mod output_store_fs;

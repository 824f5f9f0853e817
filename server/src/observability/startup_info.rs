use retouch_application::infrastructure_config::{Config, EditorConfig};
use tracing::info;

pub fn print_api_info(config: &Config) {
    if cfg!(feature = "docs") {
        print_api_documentation_info(config);
    }
    print_configuration_info(config);
}

fn print_api_documentation_info(config: &Config) {
    let base_url = format!("http://{}", config.server_address());
    info!("📋 API Documentation:");
    info!("  📖 Swagger UI: {}/docs", base_url);
    info!("  📄 OpenAPI JSON: {}/api-docs/openapi.json", base_url);
}

fn print_configuration_info(config: &Config) {
    info!("⚙️  Configuration:");
    print_editor_configuration(&config.editor);
    info!("  💾 Output directory: {}", config.storage.output_dir);
    match &config.server.static_dir {
        Some(dir) => info!("  🖼️  Static UI: {}", dir),
        None => info!("  🖼️  Static UI: disabled"),
    }
    match &config.server.cors_origin {
        Some(origin) => info!("  🌐 CORS origin: {}", origin),
        None => info!("  🌐 CORS origin: any"),
    }
}

fn print_editor_configuration(editor: &EditorConfig) {
    info!(
        "  📦 Upload limit: {} bytes, extensions: {}",
        editor.max_upload_bytes,
        editor.allowed_extensions.join(", ")
    );
    info!(
        "  📐 Output limit: {} pixels, processing timeout {}s, {} concurrent jobs",
        editor.max_output_pixels, editor.processing_timeout_secs, editor.max_concurrent_jobs
    );
}

use parish_survey::survey::RESPONSE_TABLE;
use parish_survey::{AppConfig, DataSink, SupabaseSink};

#[tokio::main]
async fn main() {
    println!("🔧 Checking survey sink connection...");

    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env();
    println!("📊 Sink configuration:");
    println!("  SUPABASE_URL: {}", if config.supabase_url.is_empty() { "<not set>" } else { &config.supabase_url });
    println!(
        "  SUPABASE_ANON_KEY: {}",
        if config.supabase_key.is_empty() { "<not set>" } else { "***set***" }
    );
    println!("  Draft path: {}", config.draft_path.display());

    let sink = match SupabaseSink::from_config(&config) {
        Ok(sink) => sink,
        Err(e) => {
            println!("❌ {}", e);
            std::process::exit(1);
        }
    };

    println!("\n🔗 Probing REST endpoint...");
    match sink.check_connection().await {
        Ok(()) => println!("✅ Sink reachable"),
        Err(e) => {
            println!("❌ Connection check failed: {}", e);
            std::process::exit(1);
        }
    }

    println!("\n🔍 Counting stored responses...");
    match sink.select(RESPONSE_TABLE, None, Some("created_at.desc")).await {
        Ok(rows) => {
            println!("✅ {} response(s) in {}", rows.len(), RESPONSE_TABLE);
            if let Some(first) = rows.first() {
                println!(
                    "  Most recent: {}",
                    first
                        .get("created_at")
                        .and_then(|v| v.as_str())
                        .unwrap_or("unknown")
                );
            }
        }
        Err(e) => println!("❌ Select failed: {}", e),
    }
}

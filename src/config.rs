use clap::Parser;

#[derive(Parser, Clone)]
pub struct Config {
    /// Google Places API key. Required on purpose, no fallback is baked in.
    #[clap(env, long)]
    pub google_api_key: String,

    /// Comma separated list of allowed CORS origins. When unset the server
    /// answers with a permissive wildcard policy instead.
    #[clap(env, long)]
    pub origin_urls: Option<String>,

    #[clap(env, long, default_value = "3000")]
    pub port: u16,
}

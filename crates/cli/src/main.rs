use clap::Parser;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stocksphere_core::catalog::Catalog;
use stocksphere_core::selection::SelectionPolicy;
use stocksphere_core::service::RecommendationService;

#[derive(Debug, Parser)]
#[command(name = "stocksphere_cli")]
struct Args {
    /// Age bracket, e.g. "25-35".
    #[arg(long)]
    age_group: Option<String>,

    /// Investing experience, e.g. "beginner".
    #[arg(long)]
    experience: Option<String>,

    /// Investment horizon, e.g. "5 years".
    #[arg(long)]
    horizon: Option<String>,

    /// low, medium or high (case-insensitive). Anything else means medium.
    #[arg(long)]
    risk_tolerance: Option<String>,

    /// Selection policy (fixed or random). Defaults to RECOMMENDATION_POLICY.
    #[arg(long)]
    policy: Option<SelectionPolicy>,

    /// Print the full catalog instead of a recommendation.
    #[arg(long)]
    catalog: bool,

    /// Pretty-print JSON output.
    #[arg(long)]
    pretty: bool,
}

impl Args {
    /// Only flags that were given end up in the payload, so validation sees
    /// absent fields the same way the HTTP endpoint does.
    fn payload(&self) -> Value {
        let fields = [
            ("age_group", &self.age_group),
            ("experience", &self.experience),
            ("horizon", &self.horizon),
            ("risk_tolerance", &self.risk_tolerance),
        ];
        let map: Map<String, Value> = fields
            .into_iter()
            .filter_map(|(k, v)| v.clone().map(|v| (k.to_string(), Value::String(v))))
            .collect();
        Value::Object(map)
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = stocksphere_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    // stdout carries the JSON result.
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();
    let policy = args.policy.unwrap_or(settings.selection_policy);
    let service = RecommendationService::new(Catalog::builtin(), policy);

    if args.catalog {
        return print_json(service.catalog(), args.pretty);
    }

    match service.recommend_value(args.payload()) {
        Ok(response) => print_json(&response, args.pretty),
        Err(err) => {
            print_json(&err.to_body(), args.pretty)?;
            let client_error = err.is_client_error();
            let err = anyhow::Error::new(err);
            if !client_error {
                sentry_anyhow::capture_anyhow(&err);
            }
            tracing::error!(error = %err, "recommendation failed");
            Err(err)
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}

fn init_sentry(settings: &stocksphere_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}

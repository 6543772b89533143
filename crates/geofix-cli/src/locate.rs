//! `geofix locate`: one request against a scripted scenario.

use std::path::PathBuf;

use clap::Args;
use geofix_core::{GeolocatorKind, Locale, LocateConfig, RequestOptions};
use geofix_locate::{Geolocator, ScriptedBackends};

#[derive(Debug, Args)]
pub(crate) struct LocateArgs {
    /// YAML scenario describing each backend's delay and native reply
    #[arg(long, env = "GEOFIX_SCENARIO")]
    pub scenario: PathBuf,

    /// Preferred backend (browser, amap, bmap, qqmap); omit to race all four
    #[arg(long)]
    pub prefer: Option<GeolocatorKind>,

    /// Reject fixes less accurate than this many meters
    #[arg(long, conflicts_with = "no_threshold", value_parser = geofix_core::parse_meters)]
    pub threshold: Option<f64>,

    /// Accept fixes of any accuracy for this request
    #[arg(long)]
    pub no_threshold: bool,

    #[arg(long)]
    pub timeout_ms: Option<u64>,

    #[arg(long)]
    pub maximum_age_ms: Option<u64>,

    /// Language of failure messages (zh-CN or en)
    #[arg(long)]
    pub locale: Option<Locale>,
}

/// Build the caller-side options; unset flags stay unset so process
/// defaults fill them.
pub(crate) fn request_options(args: &LocateArgs) -> RequestOptions {
    RequestOptions {
        accuracy_threshold: if args.no_threshold {
            Some(f64::INFINITY)
        } else {
            args.threshold
        },
        maximum_age_ms: args.maximum_age_ms,
        timeout_ms: args.timeout_ms,
        locale: args.locale,
    }
}

/// Run one request and print the fix (or failure) as JSON on stdout.
///
/// # Errors
///
/// Returns an error if the scenario cannot be loaded, or the request fails.
pub(crate) async fn run_locate(config: &LocateConfig, args: &LocateArgs) -> anyhow::Result<()> {
    let scenario = ScriptedBackends::load(&args.scenario)?;
    let geolocator = Geolocator::from_config(scenario.into_handles(), config);

    tracing::info!(
        scenario = %args.scenario.display(),
        prefer = ?args.prefer,
        "running locate"
    );
    match geolocator
        .get_location(request_options(args), args.prefer)
        .await
    {
        Ok(fix) => {
            println!("{}", serde_json::to_string_pretty(&fix)?);
            Ok(())
        }
        Err(failure) => {
            println!("{}", serde_json::to_string_pretty(&failure)?);
            Err(failure.into())
        }
    }
}

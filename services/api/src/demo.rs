use clap::Args;
use profit_mix::catalog::{parse_service_scores, CatalogImporter, Fund};
use profit_mix::error::AppError;
use profit_mix::optimizer::{
    alternative_views, BlendAlternativeView, BlendOptimizer, BlendSize, ExposureTarget,
    MetricWeights, OptimizeRequest, ServiceScores,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct OptimizeArgs {
    /// Path to the catalog CSV export (sheet,fund,equity,abroad,fx,illiquid,sharpe)
    #[arg(long)]
    pub(crate) catalog: PathBuf,
    /// Target equity exposure (%)
    #[arg(long, default_value_t = 40.0)]
    pub(crate) equity: f64,
    /// Target abroad exposure (%)
    #[arg(long, default_value_t = 60.0)]
    pub(crate) abroad: f64,
    /// Target FX exposure (%)
    #[arg(long, default_value_t = 30.0)]
    pub(crate) fx: f64,
    /// Target illiquid exposure (%)
    #[arg(long, default_value_t = 15.0)]
    pub(crate) illiquid: f64,
    /// Importance of the equity target
    #[arg(long, default_value_t = 1.0)]
    pub(crate) equity_weight: f64,
    /// Importance of the abroad target
    #[arg(long, default_value_t = 1.0)]
    pub(crate) abroad_weight: f64,
    /// Importance of the FX target
    #[arg(long, default_value_t = 1.0)]
    pub(crate) fx_weight: f64,
    /// Importance of the illiquid target
    #[arg(long, default_value_t = 1.0)]
    pub(crate) illiquid_weight: f64,
    /// Credit per point of blended sharpe ratio
    #[arg(long, default_value_t = 1.5)]
    pub(crate) sharpe_weight: f64,
    /// Credit per point of blended service score
    #[arg(long, default_value_t = 4.0)]
    pub(crate) service_weight: f64,
    /// Number of funds per blend (1, 2, or 3)
    #[arg(long, default_value = "2", value_parser = parse_blend_size)]
    pub(crate) funds: BlendSize,
    /// Only combine funds managed by the same provider
    #[arg(long)]
    pub(crate) same_provider_only: bool,
    /// Optional provider,score CSV with service-quality ratings
    #[arg(long)]
    pub(crate) service_scores: Option<PathBuf>,
    /// Service score assumed for providers missing from the ratings file
    #[arg(long, default_value_t = 70.0)]
    pub(crate) default_service_score: f64,
}

fn parse_blend_size(raw: &str) -> Result<BlendSize, String> {
    let value: u8 = raw
        .parse()
        .map_err(|_| format!("'{raw}' is not a number"))?;
    BlendSize::try_from(value)
}

pub(crate) fn run_optimize(args: OptimizeArgs) -> Result<(), AppError> {
    let load = CatalogImporter::from_path(&args.catalog)?;
    for line in &load.log {
        println!("  {line}");
    }

    let service_scores = match &args.service_scores {
        Some(path) => {
            let file = std::fs::File::open(path)?;
            parse_service_scores(file, args.default_service_score)?
        }
        None => ServiceScores::new(args.default_service_score),
    };

    let request = OptimizeRequest {
        target: ExposureTarget {
            equity: args.equity,
            abroad: args.abroad,
            fx: args.fx,
            illiquid: args.illiquid,
        },
        metric_weights: MetricWeights {
            equity: args.equity_weight,
            abroad: args.abroad_weight,
            fx: args.fx_weight,
            illiquid: args.illiquid_weight,
        },
        sharpe_weight: args.sharpe_weight,
        service_weight: args.service_weight,
        service_scores,
        same_provider_only: args.same_provider_only,
        size: args.funds,
    };

    println!(
        "\nOptimizing {}-fund blends over {} funds…",
        request.size.fund_count(),
        load.funds.len()
    );

    match BlendOptimizer::new(request).optimize(&load.funds) {
        Ok(alternatives) => print_alternatives(&alternative_views(&alternatives)),
        Err(err) => println!("warning: {err}"),
    }

    Ok(())
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Only combine funds managed by the same provider
    #[arg(long)]
    pub(crate) same_provider_only: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let funds = sample_catalog();
    println!("Sample catalog: {} funds", funds.len());

    for (label, target) in presets() {
        println!("\n=== {label} ===");
        let request = OptimizeRequest {
            target,
            metric_weights: MetricWeights::default(),
            sharpe_weight: 1.5,
            service_weight: 4.0,
            service_scores: ServiceScores::new(70.0),
            same_provider_only: args.same_provider_only,
            size: BlendSize::Pair,
        };

        match BlendOptimizer::new(request).optimize(&funds) {
            Ok(alternatives) => print_alternatives(&alternative_views(&alternatives)),
            Err(err) => println!("warning: {err}"),
        }
    }

    Ok(())
}

fn print_alternatives(views: &[BlendAlternativeView]) {
    for view in views {
        println!("{}. {} (score {:.2})", view.rank, view.badge, view.score);
        for leg in &view.legs {
            println!(
                "   {:>5.1}%  {}  [{} / {}]",
                leg.weight_pct, leg.name, leg.provider, leg.sheet
            );
        }
        let p = &view.profile;
        println!(
            "   equity {:.1} | abroad {:.1} | domestic {:.1} | fx {:.1} | illiquid {:.1} | sharpe {:.2}",
            p.equity, p.abroad, p.domestic, p.fx, p.illiquid, p.sharpe
        );
        println!(
            "   deviation {:.1} | service {:.1} | {}",
            view.deviation, view.service, view.advantage
        );
    }
}

/// The preset targets offered by the interactive tool.
fn presets() -> Vec<(&'static str, ExposureTarget)> {
    vec![
        (
            "Global 60/40",
            ExposureTarget {
                equity: 40.0,
                abroad: 60.0,
                fx: 30.0,
                illiquid: 10.0,
            },
        ),
        (
            "Max FX",
            ExposureTarget {
                equity: 40.0,
                abroad: 60.0,
                fx: 70.0,
                illiquid: 10.0,
            },
        ),
        (
            "Illiquid up to 20%",
            ExposureTarget {
                equity: 40.0,
                abroad: 50.0,
                fx: 25.0,
                illiquid: 20.0,
            },
        ),
        (
            "Conservative",
            ExposureTarget {
                equity: 20.0,
                abroad: 40.0,
                fx: 20.0,
                illiquid: 5.0,
            },
        ),
    ]
}

fn sample_fund(sheet: &str, name: &str, exposures: [f64; 5]) -> Fund {
    Fund {
        sheet: sheet.to_string(),
        provider: profit_mix::catalog::derive_provider(name),
        name: name.to_string(),
        equity: exposures[0],
        abroad: exposures[1],
        fx: exposures[2],
        illiquid: exposures[3],
        sharpe: exposures[4],
    }
}

fn sample_catalog() -> Vec<Fund> {
    vec![
        sample_fund("general", "כלל השתלמות כללי", [42.0, 55.0, 28.0, 12.0, 1.1]),
        sample_fund("equity", "כלל השתלמות מניות", [95.0, 75.0, 45.0, 8.0, 1.3]),
        sample_fund("general", "מור השתלמות כללי", [38.0, 48.0, 22.0, 15.0, 0.9]),
        sample_fund(
            "general",
            "ילין לפידות קרן השתלמות מסלול כללי",
            [40.0, 45.0, 20.0, 18.0, 1.2],
        ),
        sample_fund("equity", "אנליסט השתלמות מניות", [92.0, 80.0, 55.0, 5.0, 1.4]),
        sample_fund("bonds", "מיטב השתלמות אג\"ח", [8.0, 25.0, 10.0, 6.0, 0.6]),
    ]
}

use crate::commands::{CommandContext, CommandResult};
use onemapan::components::dashboard::models::LocationCount;
use onemapan::components::DashboardHandle;
use onemapan::components::dashboard::{DashboardQuery, DrillDown};
use rust_i18n::t;
use std::sync::Arc;

/// Show dashboard statistics for an area
pub async fn show(
    ctx: &CommandContext,
    area: String,
    province: Option<String>,
    city: Option<String>,
) -> CommandResult {
    let session = ctx.require_session()?.clone();

    let drill_down = match (province, city) {
        (Some(province), _) => Some(DrillDown::Province(province)),
        (None, Some(city)) => Some(DrillDown::City(city)),
        (None, None) => None,
    };
    let query = DashboardQuery { area, drill_down };

    let handle = DashboardHandle::new(Arc::new(ctx.api.clone()), ctx.display_options()?)
        .with_session(session);
    let dashboard = handle.load(&query).await?;
    let summary = &dashboard.summary;

    println!("== {} ==", summary.area);
    println!("{:<16} {}", t!("dashboard.total_umat"), summary.total_umat);
    println!("{:<16} {}", t!("dashboard.total_qiudao"), summary.total_qiudao);
    println!("{:<16} {}", t!("dashboard.total_vihara"), summary.total_vihara);
    println!("{:<16} {}", t!("dashboard.total_dcs"), summary.total_dcs);
    println!("{:<16} {}", t!("dashboard.tanzhu"), summary.tanzhu_count);
    println!("{:<16} {}", t!("dashboard.jiangshi"), summary.jiangshi_count);
    println!("{:<16} {}", t!("dashboard.qing_kou"), summary.qing_kou_count);
    println!("{:<16} {}", t!("dashboard.male"), summary.gender.male);
    println!("{:<16} {}", t!("dashboard.female"), summary.gender.female);

    print_counts(&t!("dashboard.by_province"), &summary.by_province);
    print_counts(&t!("dashboard.by_city"), &summary.by_city);

    println!();
    println!("{}", t!("dashboard.events"));
    if dashboard.events.is_empty() {
        println!("  {}", t!("cli.no_events"));
    }
    for event in &dashboard.events {
        println!("  {}  {}  {}", event.date_string, event.time, event.name);
    }
    Ok(())
}

fn print_counts(title: &str, counts: &[LocationCount]) {
    println!();
    println!("{}", title);
    for count in counts {
        println!("  {:<28} {}", count.name, count.count);
    }
}

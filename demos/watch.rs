use relay_dashboard::{
    ActivityLabel, Dashboard, DashboardResult, DashboardView, RatioBar, StatCounter, TablePage,
};
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Prints every view update to stdout.
struct ConsoleView;

impl DashboardView for ConsoleView {
    fn set_counter(&mut self, counter: StatCounter, value: u64) {
        println!("{:?}: {}", counter, value);
    }

    fn set_bar_width(&mut self, bar: RatioBar, percent: f64) {
        println!("{:?} bar: {:.1}%", bar, percent);
    }

    fn render_table(&mut self, page: &TablePage) {
        for row in &page.rows {
            println!(
                "{:<22} {:<20} {:>5}  {:<28} {:<10} {}",
                row.address.short_lg,
                row.moniker,
                row.peers.count,
                row.location,
                row.protocol.label,
                row.activity.label
            );
        }
        println!("{} (page {}/{})", page.info(), page.page + 1, page.page_count.max(1));
    }

    fn hide_loading(&mut self) {}

    fn show_load_failure(&mut self, message: &str) {
        eprintln!("{}", message);
    }

    fn set_sync_status(&mut self, status: &str) {
        tracing::debug!("{}", status);
    }

    fn update_activity_labels(&mut self, _labels: &[ActivityLabel]) {}
}

#[tokio::main]
async fn main() -> DashboardResult<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "relay_dashboard=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let url = env::var("DASHBOARD_URL")
        .unwrap_or_else(|_| "http://localhost:8080/proxy.php".to_string());

    let dashboard = Dashboard::builder().base_url(url)?.build()?;
    let handle = dashboard.start(ConsoleView);

    tokio::signal::ctrl_c().await.ok();
    handle.shutdown();
    Ok(())
}

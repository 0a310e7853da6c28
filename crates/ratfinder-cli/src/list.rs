//! `list`: locate, fetch and print the nearby-site list.

use anyhow::Context;
use clap::Args;
use ratfinder_core::{Coordinates, PresenterConfig};
use ratfinder_presenter::{
    ApiClient, DistanceFilter, FileStore, Presenter, SortField, StaticLocation, StatusFilter,
};

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Latitude of the search centre (falls back to RATFINDER_LOCATION)
    #[arg(long, allow_hyphen_values = true, requires = "lng")]
    pub lat: Option<f64>,
    /// Longitude of the search centre
    #[arg(long, allow_hyphen_values = true, requires = "lat")]
    pub lng: Option<f64>,
    /// Case-insensitive name filter; saved for next time
    #[arg(long)]
    pub filter: Option<String>,
    /// distance or recency; saved for next time
    #[arg(long)]
    pub sort: Option<SortField>,
    /// Distance ceiling, e.g. 20km; saved for next time
    #[arg(long)]
    pub distance: Option<DistanceFilter>,
    /// IN_STOCK, LOW_STOCK, NO_STOCK or ALL; saved for next time
    #[arg(long)]
    pub status: Option<StatusFilter>,
    /// First line of the result list to show
    #[arg(long, default_value_t = 0)]
    pub scroll: u32,
    /// Number of result lines to show
    #[arg(long, default_value_t = 40)]
    pub viewport: u32,
}

impl ListArgs {
    fn location(&self, fallback: Option<Coordinates>) -> anyhow::Result<Option<Coordinates>> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Ok(Some(Coordinates::new(lat, lng)?)),
            _ => Ok(fallback),
        }
    }
}

pub(crate) async fn run_list(config: &PresenterConfig, args: ListArgs) -> anyhow::Result<()> {
    let store = FileStore::open(&config.prefs_path)?;
    let mut presenter = Presenter::new(store);

    if let Some(text) = &args.filter {
        presenter.set_text(text.as_str())?;
    }
    if let Some(sort) = args.sort {
        presenter.set_sort(sort)?;
    }
    if let Some(distance) = args.distance {
        presenter.set_max_distance(distance)?;
    }
    if let Some(status) = args.status {
        presenter.set_status(status)?;
    }

    let locator = StaticLocation::new(args.location(config.location)?);
    let source = ApiClient::new(&config.api_url, config.api_timeout_secs)
        .with_context(|| format!("failed to build API client for {}", config.api_url))?;

    presenter.mount(&locator, &source).await;
    print!("{}", presenter.render(args.scroll, args.viewport));
    Ok(())
}

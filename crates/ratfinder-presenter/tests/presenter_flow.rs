use std::sync::atomic::{AtomicUsize, Ordering};

use ratfinder_core::{Coordinates, EnrichedSite, SiteRecord, StockStatus};
use ratfinder_presenter::{
    DistanceFilter, LocationError, LocationProvider, MemoryStore, PreferenceStore, Presenter,
    SiteSource, SortField, SourceError, StaticLocation, StatusFilter, ViewState,
};

const HERE: Coordinates = Coordinates {
    lat: -27.0,
    lng: 153.0,
};

fn site(id: &str, name: &str, distance: f64, timestamp: i64, status: StockStatus) -> EnrichedSite {
    EnrichedSite {
        site: SiteRecord {
            id: id.to_string(),
            name: name.to_string(),
            address: format!("{id} Test St"),
            lat: -27.0,
            lng: 153.0,
            date: "2022-01-10T03:04:05".to_string(),
            price_in_cents: Some(1500),
            price_per_n: Some(1),
            status,
        },
        distance,
        distance_string: format!("{distance:.2} km"),
        last_updated: "1 day ago".to_string(),
        timestamp,
    }
}

struct FixedSource {
    sites: Vec<EnrichedSite>,
    calls: AtomicUsize,
}

impl FixedSource {
    fn new(sites: Vec<EnrichedSite>) -> Self {
        Self {
            sites,
            calls: AtomicUsize::new(0),
        }
    }
}

impl SiteSource for FixedSource {
    async fn fetch_nearby(&self, _location: Coordinates) -> Result<Vec<EnrichedSite>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.sites.clone())
    }
}

struct FailingSource;

impl SiteSource for FailingSource {
    async fn fetch_nearby(&self, _location: Coordinates) -> Result<Vec<EnrichedSite>, SourceError> {
        Err(SourceError::UnexpectedStatus {
            status: 502,
            url: "http://api.test/api/rat/-27/153".to_string(),
        })
    }
}

struct DeniedLocation;

impl LocationProvider for DeniedLocation {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::Denied)
    }
}

fn catalog() -> Vec<EnrichedSite> {
    vec![
        site("2km", "Two", 2.0, 100, StockStatus::InStock),
        site("15km", "Fifteen", 15.0, 300, StockStatus::LowStock),
        site("60km", "Sixty", 60.0, 200, StockStatus::OutOfStock),
    ]
}

fn ids(presenter: &Presenter<MemoryStore>) -> Vec<&str> {
    presenter
        .visible_sites()
        .iter()
        .map(|s| s.site.id.as_str())
        .collect()
}

#[tokio::test]
async fn default_ceiling_hides_far_sites() {
    let mut presenter = Presenter::new(MemoryStore::default());
    presenter.set_sort(SortField::Distance).unwrap();
    let source = FixedSource::new(catalog());

    let state = presenter
        .mount(&StaticLocation::new(Some(HERE)), &source)
        .await;
    assert!(matches!(state, ViewState::Ready { .. }));

    assert_eq!(ids(&presenter), vec!["2km", "15km"]);
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn text_filter_matches_name_substring() {
    let mut presenter = Presenter::new(MemoryStore::default());
    let source = FixedSource::new(vec![
        site("foo", "Foobar", 1.0, 0, StockStatus::InStock),
        site("baz", "Baz", 1.0, 0, StockStatus::InStock),
    ]);
    presenter
        .mount(&StaticLocation::new(Some(HERE)), &source)
        .await;

    presenter.set_text("foo").unwrap();
    assert_eq!(ids(&presenter), vec!["foo"]);
}

#[tokio::test]
async fn controls_reapply_without_refetching() {
    let mut presenter = Presenter::new(MemoryStore::default());
    let source = FixedSource::new(catalog());
    presenter
        .mount(&StaticLocation::new(Some(HERE)), &source)
        .await;

    presenter.set_max_distance(DistanceFilter::Km100).unwrap();
    assert_eq!(ids(&presenter), vec!["15km", "60km", "2km"]);

    presenter.set_status(StatusFilter::OutOfStock).unwrap();
    assert_eq!(ids(&presenter), vec!["60km"]);

    presenter.set_control("statusFilter", "ALL").unwrap();
    presenter.set_control("sort", "distance").unwrap();
    assert_eq!(ids(&presenter), vec!["2km", "15km", "60km"]);

    assert!(presenter.set_control("distanceFilter", "7km").is_err());
    assert_eq!(presenter.filters().max_distance, DistanceFilter::Km100);
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn controls_are_rehydrated_from_store() {
    let mut store = MemoryStore::default();
    store.set("sort", "\"distance\"".to_string()).unwrap();
    store.set("distanceFilter", "\"5km\"".to_string()).unwrap();

    let mut presenter = Presenter::new(store);
    assert_eq!(presenter.filters().sort, SortField::Distance);
    assert_eq!(presenter.filters().max_distance, DistanceFilter::Km5);

    presenter
        .mount(&StaticLocation::new(Some(HERE)), &FixedSource::new(catalog()))
        .await;
    assert_eq!(ids(&presenter), vec!["2km"]);
}

#[tokio::test]
async fn empty_catalog_renders_no_results() {
    let mut presenter = Presenter::new(MemoryStore::default());
    presenter
        .mount(&StaticLocation::new(Some(HERE)), &FixedSource::new(Vec::new()))
        .await;

    assert!(matches!(presenter.state(), ViewState::Ready { sites, .. } if sites.is_empty()));
    let text = presenter.render(0, 40);
    assert!(text.starts_with("Your location is: -27, 153"));
    assert!(text.contains("No results"));
}

#[tokio::test]
async fn location_failure_is_its_own_state() {
    let mut presenter = Presenter::new(MemoryStore::default());
    let source = FixedSource::new(catalog());
    presenter.mount(&DeniedLocation, &source).await;

    assert!(matches!(
        presenter.state(),
        ViewState::LocationUnavailable { .. }
    ));
    assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    assert!(presenter
        .render(0, 40)
        .starts_with("Location unavailable: location permission denied"));
}

#[tokio::test]
async fn api_failure_is_its_own_state() {
    let mut presenter = Presenter::new(MemoryStore::default());
    presenter
        .mount(&StaticLocation::new(Some(HERE)), &FailingSource)
        .await;

    assert!(matches!(presenter.state(), ViewState::Failed { location, .. } if *location == HERE));
    let text = presenter.render(0, 40);
    assert!(text.contains("Could not load nearby sites: unexpected status 502"));
}

#[tokio::test]
async fn render_materializes_only_the_visible_window() {
    let sites: Vec<EnrichedSite> = (0..50)
        .map(|i| {
            site(
                &format!("s{i}"),
                &format!("Site {i}"),
                0.1 * f64::from(i),
                0,
                StockStatus::InStock,
            )
        })
        .collect();
    let mut presenter = Presenter::new(MemoryStore::default());
    presenter.set_sort(SortField::Distance).unwrap();
    presenter
        .mount(&StaticLocation::new(Some(HERE)), &FixedSource::new(sites))
        .await;

    // Cards are six lines plus a separator.
    let window = presenter.layout(70, 21);
    let indices: Vec<usize> = window.rows.iter().map(|r| r.index).collect();
    assert_eq!(indices, vec![9, 10, 11, 12, 13]);
    assert_eq!(window.rows[1].start, 70);

    let text = presenter.render(70, 21);
    assert!(text.contains("Site 10\n"));
    assert!(!text.contains("Site 0\n"));
    assert!(!text.contains("Site 20\n"));
    assert!(text.contains("Rows 10-14 of 50"));
}

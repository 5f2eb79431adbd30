use crate::catalog::{Catalog, CatalogEntry};
use crate::config::WidgetConfig;
use crate::control::RequestGuard;
use crate::dataset::{load_dataset, Dataset, DatasetSource};
use crate::display::{ControlPanel, DetailSurface, ListDisplay, MapDisplay, PinStyle};
use crate::error::SignalMapError;
use crate::filter::FilterState;
use crate::geolocation::UserLocation;
use crate::headless::HeadlessUi;
use crate::places::PlaceHighlight;
use crate::selection::Selection;
use crate::widget::SignalMap;

/// Message shown when the dataset cannot be loaded.
pub const LOAD_FAILED_MESSAGE: &str =
    "An error occurred while loading the map. Please check the console.";

/// Convenience type to initialize a [`SignalMap`].
///
/// ```no_run
/// use signalmap::{DatasetSource, SignalMapBuilder, WidgetConfig};
/// use signalmap::headless::HeadlessUi;
///
/// # tokio_test::block_on(async {
/// let ui = HeadlessUi::new();
/// let widget = SignalMapBuilder::new()
///     .with_config(WidgetConfig::default())
///     .with_headless(&ui)
///     .load(DatasetSource::Url("https://example.com/traffic-lights.json".into()))
///     .await
///     .expect("failed to load");
/// # });
/// ```
#[derive(Default)]
pub struct SignalMapBuilder {
    config: Option<WidgetConfig>,
    map: Option<Box<dyn MapDisplay>>,
    list: Option<Box<dyn ListDisplay>>,
    detail: Option<Box<dyn DetailSurface>>,
    controls: Option<Box<dyn ControlPanel>>,
}

struct Collaborators {
    map: Box<dyn MapDisplay>,
    list: Box<dyn ListDisplay>,
    detail: Box<dyn DetailSurface>,
    controls: Box<dyn ControlPanel>,
}

impl SignalMapBuilder {
    /// Creates a builder with the default configuration and no collaborators.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the widget configuration.
    ///
    /// Defaults to [`WidgetConfig::default()`].
    pub fn with_config(mut self, config: WidgetConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the map the lights are shown on.
    pub fn with_map_display(mut self, map: impl MapDisplay + 'static) -> Self {
        self.map = Some(Box::new(map));
        self
    }

    /// Sets the list the lights are shown in.
    pub fn with_list_display(mut self, list: impl ListDisplay + 'static) -> Self {
        self.list = Some(Box::new(list));
        self
    }

    /// Sets the popup used to show light details.
    pub fn with_detail_surface(mut self, detail: impl DetailSurface + 'static) -> Self {
        self.detail = Some(Box::new(detail));
        self
    }

    /// Sets the input fields and the notification area.
    pub fn with_control_panel(mut self, controls: impl ControlPanel + 'static) -> Self {
        self.controls = Some(Box::new(controls));
        self
    }

    /// Uses the headless UI for all collaborators.
    pub fn with_headless(self, ui: &HeadlessUi) -> Self {
        self.with_map_display(ui.clone())
            .with_list_display(ui.clone())
            .with_detail_surface(ui.clone())
            .with_control_panel(ui.clone())
    }

    fn split(self) -> Result<(WidgetConfig, Collaborators), SignalMapError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let collaborators = Collaborators {
            map: self
                .map
                .ok_or(SignalMapError::MissingCollaborator("map display"))?,
            list: self
                .list
                .ok_or(SignalMapError::MissingCollaborator("list display"))?,
            detail: self
                .detail
                .ok_or(SignalMapError::MissingCollaborator("detail surface"))?,
            controls: self
                .controls
                .ok_or(SignalMapError::MissingCollaborator("control panel"))?,
        };

        Ok((config, collaborators))
    }

    /// Builds the widget over an already loaded dataset.
    ///
    /// The map is initialized, then every record gets a marker and a list row, in dataset order.
    pub fn build(self, dataset: Dataset) -> Result<SignalMap, SignalMapError> {
        let (config, collaborators) = self.split()?;
        Ok(assemble(config, collaborators, dataset))
    }

    /// Loads the dataset and builds the widget.
    ///
    /// If loading fails, a single notification is shown and nothing else is rendered.
    pub async fn load(self, source: DatasetSource) -> Result<SignalMap, SignalMapError> {
        let (config, mut collaborators) = self.split()?;

        match load_dataset(&source).await {
            Ok(dataset) => Ok(assemble(config, collaborators, dataset)),
            Err(err) => {
                log::error!("Error loading dataset: {err}");
                collaborators.controls.notify(LOAD_FAILED_MESSAGE);
                Err(err)
            }
        }
    }

    /// Loads the dataset from the configured URL and builds the widget.
    pub async fn load_configured(self) -> Result<SignalMap, SignalMapError> {
        let url = self.config.clone().unwrap_or_default().dataset_url;
        self.load(DatasetSource::Url(url)).await
    }
}

fn assemble(config: WidgetConfig, collaborators: Collaborators, dataset: Dataset) -> SignalMap {
    let Collaborators {
        mut map,
        mut list,
        detail,
        controls,
    } = collaborators;

    map.initialize(config.center, config.zoom, &config.map_id);

    let mut catalog = Catalog::default();
    for record in dataset.into_records() {
        let marker = map.add_point_feature(
            record.position,
            &PinStyle::for_category(record.category),
            &record.code,
        );
        let row = list.add_row(&record.display_text());
        catalog.push(CatalogEntry::new(record, marker, row));
    }

    log::info!("Signal map built with {} traffic lights", catalog.len());

    SignalMap {
        config,
        catalog,
        filter: FilterState::new(),
        selection: Selection::default(),
        place: PlaceHighlight::default(),
        user_location: UserLocation::default(),
        requests: RequestGuard::default(),
        map,
        list,
        detail,
        controls,
    }
}

pub mod manage;
pub mod telemetry;

use std::collections::HashMap;

use searchctl_core::{ListKind, NodeKind};

use crate::component::Component;
use crate::screen::ScreenId;

/// One screen per tab.
pub fn create_screens() -> HashMap<ScreenId, Box<dyn Component>> {
    let mut screens: HashMap<ScreenId, Box<dyn Component>> = HashMap::new();
    screens.insert(
        ScreenId::Crawlers,
        Box::new(telemetry::TelemetryScreen::new(NodeKind::Crawler)),
    );
    screens.insert(
        ScreenId::Indexers,
        Box::new(telemetry::TelemetryScreen::new(NodeKind::Indexer)),
    );
    screens.insert(
        ScreenId::Domains,
        Box::new(manage::ManageScreen::new(ListKind::DomainBlacklist)),
    );
    screens.insert(
        ScreenId::Keywords,
        Box::new(manage::ManageScreen::new(ListKind::IllegalKeywords)),
    );
    screens
}

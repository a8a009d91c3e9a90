//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::{RouteColor, RoutePlan, TransferStep};
use crate::network::Network;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the origin/destination form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    /// All stops, sorted by name, for the pickers
    pub stops: Vec<StopOption>,
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
    pub details: Option<String>,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Plan results fragment.
#[derive(Template)]
#[template(path = "plan_results.html")]
pub struct PlanResultsTemplate {
    pub plan: PlanView,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// An entry in a stop picker.
#[derive(Debug, Clone, PartialEq)]
pub struct StopOption {
    pub id: String,
    pub name: String,
}

impl StopOption {
    /// All stops in the network, sorted by name then id.
    pub fn all(network: &Network) -> Vec<Self> {
        let mut options: Vec<Self> = network
            .stops()
            .values()
            .map(|stop| StopOption {
                id: stop.id.to_string(),
                name: stop.name.clone(),
            })
            .collect();
        options.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        options
    }
}

/// Plan view model for templates.
#[derive(Debug, Clone)]
pub struct PlanView {
    pub is_direct: bool,
    pub transfers: usize,
    pub stops: usize,
    pub steps: Vec<StepView>,
}

impl PlanView {
    /// Create from a domain RoutePlan, resolving names against the network.
    pub fn from_plan(plan: &RoutePlan, network: &Network) -> Self {
        Self {
            is_direct: plan.is_direct(),
            transfers: plan.total_transfers(),
            stops: plan.total_stops(),
            steps: plan
                .steps()
                .iter()
                .map(|step| StepView::from_step(step, network))
                .collect(),
        }
    }

    /// e.g. "Direct" or "2 transfers".
    pub fn transfers_display(&self) -> String {
        if self.is_direct {
            return "Direct".to_string();
        }
        match self.transfers {
            1 => "1 transfer".to_string(),
            n => format!("{n} transfers"),
        }
    }
}

/// One step of a plan.
#[derive(Debug, Clone)]
pub struct StepView {
    pub is_ride: bool,
    pub route_number: Option<u32>,
    pub route_name: String,
    pub color: String,

    /// Badge text colour readable on `color`
    pub text_color: &'static str,

    pub from_name: String,
    pub to_name: String,
    pub stop_count: usize,

    /// Names of the stops passed through, ends included
    pub via: Vec<String>,
}

impl StepView {
    /// Create from a domain step.
    ///
    /// Names fall back to the raw id when the network doesn't know it.
    pub fn from_step(step: &TransferStep, network: &Network) -> Self {
        let name_of = |id: &str| {
            network
                .stop(id)
                .map(|s| s.name.clone())
                .unwrap_or_else(|| id.to_string())
        };

        match step {
            TransferStep::Ride(ride) => {
                let route = network.route(ride.route.as_str());
                let via = route
                    .and_then(|r| {
                        r.segment(ride.from.as_str(), ride.to.as_str(), ride.stop_count)
                    })
                    .map(|segment| segment.iter().map(|s| name_of(s.as_str())).collect())
                    .unwrap_or_default();

                StepView {
                    is_ride: true,
                    route_number: route.map(|r| r.number),
                    route_name: route
                        .map(|r| r.name.clone())
                        .unwrap_or_else(|| ride.route.to_string()),
                    color: route
                        .map(|r| r.color.to_string())
                        .unwrap_or_else(|| "#6B7280".to_string()),
                    text_color: route.map_or("#FFFFFF", |r| text_color_on(r.color)),
                    from_name: name_of(ride.from.as_str()),
                    to_name: name_of(ride.to.as_str()),
                    stop_count: ride.stop_count,
                    via,
                }
            }
            TransferStep::Walk(walk) => StepView {
                is_ride: false,
                route_number: None,
                route_name: "Walk".to_string(),
                color: "#6B7280".to_string(),
                text_color: "#FFFFFF",
                from_name: name_of(walk.from.as_str()),
                to_name: name_of(walk.to.as_str()),
                stop_count: 0,
                via: Vec::new(),
            },
        }
    }

    /// e.g. "1 stop" or "4 stops".
    pub fn stops_display(&self) -> String {
        if self.stop_count == 1 {
            "1 stop".to_string()
        } else {
            format!("{} stops", self.stop_count)
        }
    }
}

/// Black or white, whichever reads better on `background`.
///
/// Uses the ITU-R BT.601 luma weights.
fn text_color_on(background: RouteColor) -> &'static str {
    let (r, g, b) = background.rgb();
    let luma = 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b);
    if luma > 150_000 { "#000000" } else { "#FFFFFF" }
}

//! Itinerary types.
//!
//! A `RoutePlan` is the planner's answer: an ordered list of steps from the
//! origin stop to the destination stop, plus the two totals the planner
//! optimises (transfers first, then stops ridden).

use super::{DomainError, RouteId, StopId};

/// One continuous ride on a single route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ride {
    /// Route ridden
    pub route: RouteId,
    /// Boarding stop
    pub from: StopId,
    /// Alighting stop
    pub to: StopId,
    /// Stop-to-stop hops covered along the route's stored order
    pub stop_count: usize,
}

impl Ride {
    /// Creates a new ride step.
    pub fn new(route: RouteId, from: StopId, to: StopId, stop_count: usize) -> Self {
        Self {
            route,
            from,
            to,
            stop_count,
        }
    }
}

/// A walk between two stops.
///
/// Representable in a plan but never produced by the current planner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Walk {
    pub from: StopId,
    pub to: StopId,
}

impl Walk {
    /// Creates a new walk step.
    pub fn new(from: StopId, to: StopId) -> Self {
        Self { from, to }
    }
}

/// A single leg of an itinerary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferStep {
    Ride(Ride),
    Walk(Walk),
}

impl TransferStep {
    /// Returns the boarding (or walk start) stop.
    pub fn from(&self) -> &StopId {
        match self {
            TransferStep::Ride(ride) => &ride.from,
            TransferStep::Walk(walk) => &walk.from,
        }
    }

    /// Returns the alighting (or walk end) stop.
    pub fn to(&self) -> &StopId {
        match self {
            TransferStep::Ride(ride) => &ride.to,
            TransferStep::Walk(walk) => &walk.to,
        }
    }

    /// Returns the route ridden, if this is a ride.
    pub fn route(&self) -> Option<&RouteId> {
        self.as_ride().map(|ride| &ride.route)
    }

    /// Returns the hop count, if this is a ride.
    pub fn stop_count(&self) -> Option<usize> {
        self.as_ride().map(|ride| ride.stop_count)
    }

    /// Returns true if this is a ride step.
    pub fn is_ride(&self) -> bool {
        matches!(self, TransferStep::Ride(_))
    }

    /// Returns true if this is a walk step.
    pub fn is_walk(&self) -> bool {
        matches!(self, TransferStep::Walk(_))
    }

    /// Returns the ride if this is a ride step.
    pub fn as_ride(&self) -> Option<&Ride> {
        match self {
            TransferStep::Ride(ride) => Some(ride),
            TransferStep::Walk(_) => None,
        }
    }
}

/// The cost the planner minimises, compared lexicographically:
/// fewer transfers always wins, stops ridden breaks ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PlanCost {
    pub transfers: usize,
    pub stops: usize,
}

impl PlanCost {
    pub fn new(transfers: usize, stops: usize) -> Self {
        Self { transfers, stops }
    }
}

/// A complete itinerary from origin to destination.
///
/// # Invariants
///
/// - At least one step
/// - Consecutive steps connect (`steps[i].to == steps[i + 1].from`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePlan {
    steps: Vec<TransferStep>,
    total_transfers: usize,
    total_stops: usize,
}

impl RoutePlan {
    /// Constructs a plan, deriving its totals from the steps.
    ///
    /// Transfers are counted between rides only; walks are free.
    ///
    /// # Examples
    ///
    /// ```
    /// use jeepney_planner::domain::{Ride, RouteId, RoutePlan, StopId, TransferStep};
    ///
    /// let r1 = RouteId::parse("route-1").unwrap();
    /// let r2 = RouteId::parse("route-2").unwrap();
    /// let s = |id: &str| StopId::parse(id).unwrap();
    ///
    /// let plan = RoutePlan::new(vec![
    ///     TransferStep::Ride(Ride::new(r1, s("s1"), s("s3"), 2)),
    ///     TransferStep::Ride(Ride::new(r2, s("s3"), s("s6"), 2)),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(plan.total_transfers(), 1);
    /// assert_eq!(plan.total_stops(), 4);
    /// ```
    pub fn new(steps: Vec<TransferStep>) -> Result<Self, DomainError> {
        if steps.is_empty() {
            return Err(DomainError::EmptyPlan);
        }

        for window in steps.windows(2) {
            let prev_to = window[0].to();
            let next_from = window[1].from();
            if prev_to != next_from {
                return Err(DomainError::StepsNotConnected(
                    prev_to.clone(),
                    next_from.clone(),
                ));
            }
        }

        let rides = steps.iter().filter(|s| s.is_ride()).count();
        let total_stops = steps.iter().filter_map(TransferStep::stop_count).sum();

        Ok(RoutePlan {
            steps,
            total_transfers: rides.saturating_sub(1),
            total_stops,
        })
    }

    /// Returns all steps in order.
    pub fn steps(&self) -> &[TransferStep] {
        &self.steps
    }

    /// Returns the ride steps in order.
    pub fn rides(&self) -> impl Iterator<Item = &Ride> {
        self.steps.iter().filter_map(TransferStep::as_ride)
    }

    /// Number of route changes.
    pub fn total_transfers(&self) -> usize {
        self.total_transfers
    }

    /// Stop-to-stop hops ridden across all rides.
    pub fn total_stops(&self) -> usize {
        self.total_stops
    }

    /// The (transfers, stops) pair this plan scores.
    pub fn cost(&self) -> PlanCost {
        PlanCost::new(self.total_transfers, self.total_stops)
    }

    /// Returns the origin stop.
    pub fn origin(&self) -> &StopId {
        self.steps[0].from()
    }

    /// Returns the destination stop.
    pub fn destination(&self) -> &StopId {
        self.steps[self.steps.len() - 1].to()
    }

    /// Returns true if the plan needs no transfers.
    pub fn is_direct(&self) -> bool {
        self.total_transfers == 0
    }
}

use fxhash::FxHashSet;
use tracing::instrument;

use crate::{
    error::{SolveError, ValidationError},
    problem::{
        fleet::Fleet,
        location::{Location, LocationIdx},
        order::{Order, OrderIdx},
        travel_matrix::TravelMatrix,
    },
    solver::solver_params::SolverParams,
};

/// One validated request: the orders, the fleet and the travel matrix over depot + orders.
///
/// Location `0` is the depot, order `i` lives at location `i + 1`.
pub struct DeliveryProblem {
    depot: Location,
    orders: Vec<Order>,
    locations: Vec<Location>,
    fleet: Fleet,
    matrix: TravelMatrix,
}

impl DeliveryProblem {
    #[instrument(skip_all, level = "debug")]
    pub fn new(
        orders: Vec<Order>,
        num_trucks: usize,
        params: &SolverParams,
    ) -> Result<Self, SolveError> {
        params.validate()?;
        let fleet = Fleet::new(num_trucks, params.truck_capacity_kg)?;

        let mut seen = FxHashSet::default();
        for order in &orders {
            order.validate()?;
            if !seen.insert(order.id.as_str()) {
                return Err(ValidationError::DuplicateOrderId {
                    id: order.id.clone(),
                }
                .into());
            }
        }

        let depot = params.depot;
        let locations: Vec<Location> = std::iter::once(depot)
            .chain(orders.iter().map(Order::location))
            .collect();

        let matrix =
            TravelMatrix::from_haversine(&locations, params.average_speed, params.service_duration);
        matrix.verify()?;

        Ok(DeliveryProblem {
            depot,
            orders,
            locations,
            fleet,
            matrix,
        })
    }

    pub fn depot(&self) -> &Location {
        &self.depot
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    #[inline]
    pub fn order(&self, order_id: OrderIdx) -> &Order {
        &self.orders[order_id]
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn matrix(&self) -> &TravelMatrix {
        &self.matrix
    }

    #[inline]
    pub fn location(&self, location_id: LocationIdx) -> &Location {
        &self.locations[location_id]
    }

    #[inline]
    pub fn location_id(&self, order_id: OrderIdx) -> LocationIdx {
        LocationIdx::new(order_id.get() + 1)
    }

    /// Inverse of [`Self::location_id`]; `None` for the depot.
    #[inline]
    pub fn order_id(&self, location_id: LocationIdx) -> Option<OrderIdx> {
        location_id
            .get()
            .checked_sub(1)
            .map(OrderIdx::new)
    }

    pub fn distance_from_depot(&self, order_id: OrderIdx) -> f64 {
        self.matrix
            .distance(LocationIdx::DEPOT, self.location_id(order_id))
    }

    pub fn bearing_from_depot(&self, order_id: OrderIdx) -> f64 {
        self.depot.bearing(self.location(self.location_id(order_id)))
    }
}

//! Fluent builder for constructing a [`Sim`].

use tracing::info;

use dl_core::SimConfig;
use dl_courier::Courier;
use dl_dispatch::{Dispatcher, FastestCourierDispatcher};
use dl_store::DeliveryStore;

use crate::unit::in_unit_of_work;
use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<S, D>`].
///
/// # Optional inputs (have defaults)
///
/// | Method             | Default                      |
/// |--------------------|------------------------------|
/// | `.dispatcher(d)`   | [`FastestCourierDispatcher`] |
/// | `.couriers(v)`     | none added                   |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, InMemoryStore::new())
///     .couriers(couriers)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<S: DeliveryStore, D: Dispatcher = FastestCourierDispatcher> {
    config:     SimConfig,
    store:      S,
    dispatcher: D,
    couriers:   Vec<Courier>,
}

impl<S: DeliveryStore> SimBuilder<S> {
    pub fn new(config: SimConfig, store: S) -> Self {
        Self {
            config,
            store,
            dispatcher: FastestCourierDispatcher,
            couriers:   Vec::new(),
        }
    }
}

impl<S: DeliveryStore, D: Dispatcher> SimBuilder<S, D> {
    /// Replace the matching policy.
    pub fn dispatcher<D2: Dispatcher>(self, dispatcher: D2) -> SimBuilder<S, D2> {
        SimBuilder {
            config:   self.config,
            store:    self.store,
            dispatcher,
            couriers: self.couriers,
        }
    }

    /// Couriers to add to the store (in one commit) when the sim is built.
    pub fn couriers(mut self, couriers: Vec<Courier>) -> Self {
        self.couriers = couriers;
        self
    }

    /// Validate the config, seed the store, and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<S, D>> {
        self.config
            .validate()
            .map_err(|e| SimError::Config(e.to_string()))?;

        let mut store = self.store;
        if !self.couriers.is_empty() {
            in_unit_of_work(&mut store, |store| {
                for courier in &self.couriers {
                    store.add_courier(courier)?;
                }
                Ok(())
            })?;
            info!(couriers = self.couriers.len(), "couriers hired");
        }

        Ok(Sim {
            clock:      self.config.make_clock(),
            config:     self.config,
            store,
            dispatcher: self.dispatcher,
        })
    }
}

pub mod teleport_system;
pub mod trajectory;

pub use teleport_system::{TeleportButton, TeleportConfig, TeleportHandState, TeleportSystem};
pub use trajectory::{ArcParams, ArcTrajectory, TeleportArea};

use std::cell::RefCell;
use std::rc::Rc;

use crate::component::Component;
use crate::input_context::InputContext;
use crate::locomotion::SharedLocomotion;
use crate::time::Time;

/// Feeds controller input through a [`TeleportSystem`] and hands released
/// teleports to the shared locomotion provider.
pub struct HandTeleport {
    system: TeleportSystem,
    input: Rc<RefCell<InputContext>>,
    locomotion: SharedLocomotion,
    teleports: u64,
}

impl HandTeleport {
    pub fn new(
        config: TeleportConfig,
        input: Rc<RefCell<InputContext>>,
        locomotion: SharedLocomotion,
    ) -> Self {
        HandTeleport {
            system: TeleportSystem::new(config),
            input,
            locomotion,
            teleports: 0,
        }
    }

    pub fn system(&self) -> &TeleportSystem {
        &self.system
    }

    pub fn system_mut(&mut self) -> &mut TeleportSystem {
        &mut self.system
    }

    /// Requests accepted by the provider.
    pub fn teleports(&self) -> u64 {
        self.teleports
    }
}

impl Component for HandTeleport {
    fn name(&self) -> &str {
        "hand_teleport"
    }

    fn tick(&mut self, _time: &Time) {
        let request = self.system.update(&self.input.borrow());
        if let Some(request) = request {
            if self.locomotion.borrow_mut().request_teleport(request) {
                self.teleports += 1;
            }
        }
    }
}

//! Client slot table and event routing.

use std::sync::Arc;

use opendongle_controller::{Controller, PacketSender, RumbleMapper};
use opendongle_errors::{DongleError, ErrorSeverity, Result};
use opendongle_input::InputDevice;
use parking_lot::Mutex;
use tracing::{debug, error, info, info_span, warn};

use crate::config::DongleConfig;
use crate::framing::build_controller_frame;
use crate::radio::MacAddress;
use crate::transport::{McuCommand, RadioTransport};

/// Number of client slots the radio exposes.
pub const MAX_CLIENTS: usize = 16;

/// Map a wireless client id (1-based) to its slot.
pub fn slot_index(wcid: u8) -> Result<usize> {
    let slot = usize::from(wcid)
        .checked_sub(1)
        .filter(|slot| *slot < MAX_CLIENTS);
    slot.ok_or(DongleError::InvalidClient(wcid))
}

/// Creates the virtual input device for a newly connected client.
pub trait InputDeviceFactory: Send + Sync {
    fn create_device(&self, wcid: u8) -> Box<dyn InputDevice>;
}

impl<F> InputDeviceFactory for F
where
    F: Fn(u8) -> Box<dyn InputDevice> + Send + Sync,
{
    fn create_device(&self, wcid: u8) -> Box<dyn InputDevice> {
        self(wcid)
    }
}

/// Events raised by the radio driver's receive thread.
pub trait ClientEvents: Send + Sync {
    fn client_connected(&self, wcid: u8, address: MacAddress);
    fn client_disconnected(&self, wcid: u8);
    fn packet_received(&self, wcid: u8, packet: &[u8]);
}

/// Packet sender bound to one radio client.
pub struct ClientLink<T: RadioTransport> {
    transport: Arc<T>,
    wcid: u8,
    address: MacAddress,
}

impl<T: RadioTransport> ClientLink<T> {
    pub fn new(transport: Arc<T>, wcid: u8, address: MacAddress) -> Self {
        Self {
            transport,
            wcid,
            address,
        }
    }
}

impl<T: RadioTransport> PacketSender for ClientLink<T> {
    fn send_packet(&self, packet: &[u8]) -> Result<()> {
        transmit(self.transport.as_ref(), self.wcid, self.address, packet)
    }
}

fn transmit<T: RadioTransport + ?Sized>(
    transport: &T,
    wcid: u8,
    address: MacAddress,
    payload: &[u8],
) -> Result<()> {
    let frame = build_controller_frame(wcid, address, transport.mac_address(), payload)?;
    transport
        .send_command(McuCommand::PacketTx, &frame)
        .map_err(|e| {
            error!(wcid, error = %e, "Failed to send controller packet");
            DongleError::from(e)
        })
}

struct RegistryState {
    controllers: Vec<Option<Controller>>,
    closing: bool,
}

impl RegistryState {
    fn slot_mut(&mut self, wcid: u8) -> Result<&mut Option<Controller>> {
        let slot = slot_index(wcid)?;
        self.controllers
            .get_mut(slot)
            .ok_or(DongleError::InvalidClient(wcid))
    }
}

/// The dongle: one controller session per connected radio client.
///
/// Every entry point holds the registry lock for its whole duration, so a
/// connection racing [`Dongle::before_close`] is either swept or refused.
pub struct Dongle<T: RadioTransport> {
    transport: Arc<T>,
    factory: Arc<dyn InputDeviceFactory>,
    config: DongleConfig,
    state: Mutex<RegistryState>,
}

impl<T: RadioTransport + 'static> Dongle<T> {
    pub fn new(
        transport: Arc<T>,
        factory: Arc<dyn InputDeviceFactory>,
        config: DongleConfig,
    ) -> Self {
        Self {
            transport,
            factory,
            config,
            state: Mutex::new(RegistryState {
                controllers: (0..MAX_CLIENTS).map(|_| None).collect(),
                closing: false,
            }),
        }
    }

    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    pub fn after_open(&self) -> Result<()> {
        info!("Dongle plugged in");
        self.transport.open().inspect_err(|e| {
            error!(error = %e, "Failed to open dongle");
        })?;
        self.state.lock().closing = false;
        info!(address = %self.transport.mac_address(), "Dongle initialized");
        Ok(())
    }

    /// Power off every connected controller, then close the transport.
    ///
    /// Individual power-off failures are logged and the sweep continues;
    /// only the transport's close result is returned.
    pub fn before_close(&self) -> Result<()> {
        let mut state = self.state.lock();
        state.closing = true;

        if !self.config.power_off_on_close {
            warn!("Power-off on close is disabled, leaving controllers on");
        } else {
            info!("Dongle power-off");
            for (wcid, controller) in (1u8..).zip(state.controllers.iter()) {
                let Some(controller) = controller else {
                    continue;
                };
                if let Err(e) = controller.power_off() {
                    error!(wcid, error = %e, "Failed to power off controller");
                }
            }
        }

        self.transport.close().map_err(|e| {
            error!(error = %e, "Failed to close dongle");
            DongleError::from(e)
        })
    }

    /// Wrap `payload` in a radio frame for client `wcid` and transmit it.
    pub fn send_controller_packet(
        &self,
        wcid: u8,
        address: MacAddress,
        payload: &[u8],
    ) -> Result<()> {
        transmit(self.transport.as_ref(), wcid, address, payload)
    }

    pub fn is_connected(&self, wcid: u8) -> bool {
        let mut state = self.state.lock();
        state
            .slot_mut(wcid)
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    pub fn connected_count(&self) -> usize {
        self.state
            .lock()
            .controllers
            .iter()
            .filter(|c| c.is_some())
            .count()
    }

    pub fn is_closing(&self) -> bool {
        self.state.lock().closing
    }

    /// Rumble mapper of the controller in slot `wcid`.
    pub fn feedback_handler(&self, wcid: u8) -> Result<Arc<RumbleMapper>> {
        let mut state = self.state.lock();
        state
            .slot_mut(wcid)?
            .as_ref()
            .map(Controller::feedback_handler)
            .ok_or(DongleError::NotConnected(wcid))
    }

    fn connect(&self, wcid: u8, address: MacAddress) -> Result<()> {
        let mut state = self.state.lock();
        if state.closing {
            return Err(DongleError::Closing);
        }
        let slot = state.slot_mut(wcid)?;

        let link = ClientLink::new(Arc::clone(&self.transport), wcid, address);
        let device = self.factory.create_device(wcid);
        let controller = Controller::new(Arc::new(link), device, self.config.controller.clone());
        if slot.replace(controller).is_some() {
            debug!("Replaced previous session");
        }
        Ok(())
    }

    fn disconnect(&self, wcid: u8) -> Result<()> {
        let mut state = self.state.lock();
        match state.slot_mut(wcid)?.take() {
            Some(_) => Ok(()),
            None => Err(DongleError::NotConnected(wcid)),
        }
    }

    fn route(&self, wcid: u8, packet: &[u8]) -> Result<()> {
        let mut state = self.state.lock();
        let controller = state
            .slot_mut(wcid)?
            .as_mut()
            .ok_or(DongleError::NotConnected(wcid))?;
        controller.handle_packet(packet)
    }
}

impl<T: RadioTransport + 'static> ClientEvents for Dongle<T> {
    fn client_connected(&self, wcid: u8, address: MacAddress) {
        let _span = info_span!("client", wcid).entered();
        match self.connect(wcid, address) {
            Ok(()) => info!(%address, "Controller '{wcid}' connected"),
            Err(DongleError::Closing) => {
                warn!(%address, "Dongle is closing, refusing controller '{wcid}'");
            }
            Err(e) => error!(error = %e, "Failed to connect controller '{wcid}'"),
        }
    }

    fn client_disconnected(&self, wcid: u8) {
        let _span = info_span!("client", wcid).entered();
        match self.disconnect(wcid) {
            Ok(()) => info!("Controller '{wcid}' disconnected"),
            Err(DongleError::NotConnected(_)) => {
                error!("Controller '{wcid}' is not connected");
            }
            Err(e) => error!(error = %e, "Failed to disconnect controller '{wcid}'"),
        }
    }

    fn packet_received(&self, wcid: u8, packet: &[u8]) {
        let _span = info_span!("client", wcid).entered();
        match self.route(wcid, packet) {
            Ok(()) => {}
            Err(DongleError::NotConnected(_)) => {
                error!("Packet for unconnected controller '{wcid}'");
            }
            Err(e) if e.severity() <= ErrorSeverity::Warning => {
                warn!(error = %e, "Error handling packet for controller '{wcid}'");
            }
            Err(e) => error!(error = %e, "Error handling packet for controller '{wcid}'"),
        }
    }
}

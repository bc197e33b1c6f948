use std::time::Duration;

use homelink_api::{Circuit, Command};
use homelink_embedded::{
    GpioRelays, Key, MasterDevices, MasterNode, NbSerialLink, PWM_PERIOD, PirPair, PwmLighting,
    Relay, SharedNode, SlaveDevices, SlaveNode,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tokio::time;

use crate::error::SimulationError;
use crate::hardware::{LogDisplay, VirtualKeypad, VirtualPin, VirtualPwm};
use crate::settings::Settings;
use crate::wire::{self, SerialPort, WireStats};

type Master = MasterNode<NbSerialLink<SerialPort>, VirtualKeypad, GpioRelays<VirtualPin>, LogDisplay>;
type Slave = SlaveNode<NbSerialLink<SerialPort>, PwmLighting<VirtualPwm, VirtualPwm>, PirPair<VirtualPin, VirtualPin>>;

#[derive(Debug, Clone, Serialize)]
pub struct RelayState {
    pub relay: Relay,
    pub on: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CircuitLevels {
    pub hallway: u16,
    pub bathroom: u16,
}

#[derive(Debug, Clone, Serialize)]
pub struct MasterReport {
    pub devices: MasterDevices,
    pub selected: Option<Circuit>,
    pub relays: Vec<RelayState>,
    pub buzzer_edges: u32,
    pub screen: Vec<String>,
    pub wire: WireStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlaveReport {
    pub devices: SlaveDevices,
    pub brightness: CircuitLevels,
    pub duty: CircuitLevels,
    pub boots: u32,
    pub wire: WireStats,
}

/// Final state of both nodes after a run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub ticks: u64,
    pub master: MasterReport,
    pub slave: SlaveReport,
}

struct ScheduledKey {
    tick: u64,
    key: Key,
    hold: u64,
}

struct MasterBoard {
    port: SerialPort,
    keypad: VirtualKeypad,
    relays: Vec<(Relay, VirtualPin)>,
    buzzer: VirtualPin,
    display: LogDisplay,
}

struct SlaveBoard {
    port: SerialPort,
    hallway_pwm: VirtualPwm,
    bathroom_pwm: VirtualPwm,
    hallway_pir: VirtualPin,
    bathroom_pir: VirtualPin,
}

impl SlaveBoard {
    fn pir(&self, circuit: Circuit) -> &VirtualPin {
        match circuit {
            Circuit::Hallway => &self.hallway_pir,
            Circuit::Bathroom => &self.bathroom_pir,
        }
    }

    fn build(&self) -> Slave {
        SlaveNode::new(
            NbSerialLink::new(self.port.clone()),
            PwmLighting::new(self.hallway_pwm.clone(), self.bathroom_pwm.clone()),
            PirPair::new(self.hallway_pir.clone(), self.bathroom_pir.clone()),
        )
    }
}

/// Runs a Master and a Slave against virtual hardware joined by an
/// in-memory serial link.
pub struct Simulator {
    settings: Settings,
    keys: Vec<ScheduledKey>,
    injected: Vec<(u64, u8)>,
    master: SharedNode<Master>,
    slave: SharedNode<Slave>,
    master_board: MasterBoard,
    slave_board: SlaveBoard,
    rng: StdRng,
    tick: u64,
    slave_boots: u32,
}

impl Simulator {
    pub fn new(settings: &Settings) -> Result<Self, SimulationError> {
        let keys = settings
            .simulation
            .keys
            .iter()
            .map(|press| -> Result<ScheduledKey, SimulationError> {
                Ok(ScheduledKey {
                    tick: press.tick,
                    key: Key::try_from(press.key)?,
                    hold: press.hold.max(1),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let injected = settings
            .simulation
            .injected
            .iter()
            .map(|injected| -> Result<(u64, u8), SimulationError> {
                if !injected.byte.is_ascii() {
                    return Err(SimulationError::InvalidSetting(format!(
                        "injected byte {:?} is not ASCII",
                        injected.byte
                    )));
                }
                let command = Command::try_from(injected.byte as u8)?;
                Ok((injected.tick, command.as_byte()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let (master_port, slave_port) = wire::pair(settings.link.loss_rate, settings.link.seed);

        let relays: Vec<(Relay, VirtualPin)> =
            Relay::ALL.iter().map(|&relay| (relay, VirtualPin::new())).collect();
        let master_board = MasterBoard {
            port: master_port,
            keypad: VirtualKeypad::new(),
            relays,
            buzzer: VirtualPin::new(),
            display: LogDisplay::new(),
        };
        let slave_board = SlaveBoard {
            port: slave_port,
            hallway_pwm: VirtualPwm::new(PWM_PERIOD),
            bathroom_pwm: VirtualPwm::new(PWM_PERIOD),
            hallway_pir: VirtualPin::new(),
            bathroom_pir: VirtualPin::new(),
        };

        let mut simulator = Self {
            settings: settings.clone(),
            keys,
            injected,
            master: SharedNode::new(),
            slave: SharedNode::new(),
            master_board,
            slave_board,
            rng: StdRng::seed_from_u64(settings.link.seed),
            tick: 0,
            slave_boots: 0,
        };

        simulator.master.install(simulator.build_master());
        simulator.master.with(|node| node.start())?;
        simulator.boot_slave()?;

        Ok(simulator)
    }

    fn build_master(&self) -> Master {
        let board = &self.master_board;
        let pin = |wanted: Relay| {
            board
                .relays
                .iter()
                .find(|(relay, _)| *relay == wanted)
                .map(|(_, pin)| pin.clone())
                .unwrap_or_default()
        };

        let mut outputs = GpioRelays::new(
            pin(Relay::Lamp),
            pin(Relay::Pole),
            pin(Relay::Fan),
            board.buzzer.clone(),
        );
        for (relay, pin) in &board.relays {
            if !matches!(relay, Relay::Lamp | Relay::Pole | Relay::Fan) {
                outputs = outputs.with_relay(*relay, pin.clone());
            }
        }

        MasterNode::new(
            NbSerialLink::new(board.port.clone()),
            board.keypad.clone(),
            outputs,
            board.display.clone(),
        )
    }

    fn boot_slave(&mut self) -> Result<(), SimulationError> {
        self.slave_board.port.flush_rx();
        self.slave.install(self.slave_board.build());
        self.slave.with(|node| node.start())?;
        self.slave_boots += 1;
        Ok(())
    }

    /// Power-cycles the Slave. Its state is lost and it announces itself
    /// again; the Master is left running.
    pub fn reboot_slave(&mut self) -> Result<(), SimulationError> {
        tracing::info!("Rebooting slave at tick {}", self.tick);
        self.slave.take();
        self.boot_slave()
    }

    pub fn press_key(&self, key: Key) {
        tracing::debug!("Key {} down", key);
        self.master_board.keypad.press(key);
    }

    pub fn release_key(&self) {
        self.master_board.keypad.release();
    }

    /// Changes a PIR level and raises the Slave's edge interrupt.
    pub fn set_presence(&self, circuit: Circuit, present: bool) -> Result<(), SimulationError> {
        let pin = self.slave_board.pir(circuit);
        if pin.is_set() == present {
            return Ok(());
        }
        tracing::debug!("{} presence -> {}", circuit, present);
        pin.drive(present);
        self.slave.with(|node| node.on_edge_interrupt())?;
        Ok(())
    }

    /// Pushes a raw byte onto the Master's receive line.
    pub fn inject_to_master(&self, byte: u8) {
        self.master_board.port.inject(byte);
    }

    /// Advances both nodes by one tick.
    pub fn step(&mut self) -> Result<(), SimulationError> {
        let tick = self.tick;

        if self.settings.simulation.slave_reboots.contains(&tick) {
            self.reboot_slave()?;
        }

        for (_, byte) in self.injected.iter().filter(|(at, _)| *at == tick) {
            self.inject_to_master(*byte);
        }

        if self.keys.iter().any(|k| k.tick + k.hold == tick) {
            self.release_key();
        }
        if let Some(key) = self.keys.iter().find(|k| k.tick == tick).map(|k| k.key) {
            self.press_key(key);
        }

        for change in self.settings.simulation.presence.iter().filter(|c| c.tick == tick) {
            self.set_presence(change.circuit, change.present)?;
        }

        let motion_probability = self.settings.simulation.motion_probability;
        if motion_probability > 0.0 && self.rng.random_bool(motion_probability) {
            let circuit = if self.rng.random_bool(0.5) {
                Circuit::Hallway
            } else {
                Circuit::Bathroom
            };
            let present = !self.slave_board.pir(circuit).is_set();
            self.set_presence(circuit, present)?;
        }

        self.master.with(|node| node.on_tick())?;
        self.slave.with(|node| node.on_tick())?;

        if tick % u64::from(self.settings.link.display_divisor) == 0 {
            self.master.with(|node| node.refresh_display())?;
        }

        self.tick += 1;
        Ok(())
    }

    /// Steps until the configured tick count, pacing each tick in real time
    /// when asked to.
    pub async fn run(&mut self) -> Result<Report, SimulationError> {
        let period = Duration::from_secs_f64(1.0 / f64::from(self.settings.link.tick_hz));
        let mut interval = self.settings.simulation.realtime.then(|| time::interval(period));

        while self.tick < self.settings.simulation.ticks {
            if let Some(interval) = interval.as_mut() {
                interval.tick().await;
            }
            self.step()?;
        }

        tracing::info!("Simulation finished after {} ticks", self.tick);
        self.report()
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn master_devices(&self) -> Result<MasterDevices, SimulationError> {
        Ok(self.master.with(|node| *node.devices())?)
    }

    pub fn selected(&self) -> Result<Option<Circuit>, SimulationError> {
        Ok(self.master.with(|node| node.selected())?)
    }

    pub fn slave_devices(&self) -> Result<SlaveDevices, SimulationError> {
        Ok(self.slave.with(|node| *node.devices())?)
    }

    pub fn duty(&self, circuit: Circuit) -> u16 {
        match circuit {
            Circuit::Hallway => self.slave_board.hallway_pwm.duty(),
            Circuit::Bathroom => self.slave_board.bathroom_pwm.duty(),
        }
    }

    pub fn relay(&self, relay: Relay) -> bool {
        self.master_board
            .relays
            .iter()
            .any(|(r, pin)| *r == relay && pin.is_set())
    }

    pub fn buzzer_edges(&self) -> u32 {
        self.master_board.buzzer.edges()
    }

    pub fn screen(&self) -> Vec<String> {
        self.master_board.display.rows()
    }

    pub fn report(&self) -> Result<Report, SimulationError> {
        let (devices, selected) = self.master.with(|node| (*node.devices(), node.selected()))?;
        let (slave_devices, brightness) = self.slave.with(|node| {
            let levels = CircuitLevels {
                hallway: node.brightness(Circuit::Hallway).duty(),
                bathroom: node.brightness(Circuit::Bathroom).duty(),
            };
            (*node.devices(), levels)
        })?;

        Ok(Report {
            ticks: self.tick,
            master: MasterReport {
                devices,
                selected,
                relays: self
                    .master_board
                    .relays
                    .iter()
                    .map(|(relay, pin)| RelayState {
                        relay: *relay,
                        on: pin.is_set(),
                    })
                    .collect(),
                buzzer_edges: self.buzzer_edges(),
                screen: self.screen(),
                wire: self.master_board.port.stats(),
            },
            slave: SlaveReport {
                devices: slave_devices,
                brightness,
                duty: CircuitLevels {
                    hallway: self.duty(Circuit::Hallway),
                    bathroom: self.duty(Circuit::Bathroom),
                },
                boots: self.slave_boots,
                wire: self.slave_board.port.stats(),
            },
        })
    }
}

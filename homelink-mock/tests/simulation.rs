use homelink_api::Circuit;
use homelink_embedded::{Error, Key, Relay};
use homelink_mock::settings::{InjectedByte, KeyPress, PresenceChange, Settings};
use homelink_mock::{SimulationError, Simulator, run};

const BASE: &str = r#"
[logger]
level = "debug"

[link]
tick_hz = 1000
display_divisor = 1
loss_rate = 0.0
seed = 42

[simulation]
ticks = 0
realtime = false
motion_probability = 0.0
"#;

fn settings() -> Settings {
    Settings::parse(BASE).unwrap()
}

/// A simulator that has already consumed the Slave's boot announcement.
fn booted(settings: &Settings) -> Simulator {
    let mut sim = Simulator::new(settings).unwrap();
    sim.step().unwrap();
    sim
}

fn tap(sim: &mut Simulator, key: Key) {
    sim.press_key(key);
    sim.step().unwrap();
    sim.release_key();
    sim.step().unwrap();
}

#[tokio::test]
async fn test_default_scenario() {
    let settings = Settings::new().unwrap();
    let report = run(&settings).await.unwrap();

    assert_eq!(report.ticks, settings.simulation.ticks);
    assert!(report.master.devices.is_all_off());
    assert_eq!(report.master.selected, None);
    assert!(report.master.relays.iter().all(|state| !state.on));
    assert_eq!(report.master.buzzer_edges, 60);
    assert_eq!(report.master.wire.delivered, 4);

    assert!(!report.slave.devices.hallway);
    assert!(!report.slave.devices.bathroom);
    assert_eq!(report.slave.brightness.hallway, 47_000);
    assert_eq!(report.slave.brightness.bathroom, 40_000);
    assert_eq!(report.slave.duty.hallway, 2);
    assert_eq!(report.slave.duty.bathroom, 2);
    assert_eq!(report.slave.boots, 1);
    assert_eq!(report.slave.wire.delivered, 3);

    assert_eq!(report.master.screen[0], "___MASTER___");
    assert_eq!(report.master.screen[3], "LAMP:    OFF");

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["slave"]["boots"], 1);
}

#[tokio::test]
async fn test_keypad_drives_slave_lighting() {
    let mut sim = booted(&settings());
    assert_eq!(sim.duty(Circuit::Hallway), 2);

    tap(&mut sim, Key::Star);
    assert!(sim.master_devices().unwrap().hallway);
    assert_eq!(sim.selected().unwrap(), Some(Circuit::Hallway));
    assert!(sim.slave_devices().unwrap().hallway);
    assert_eq!(sim.duty(Circuit::Hallway), 40_000);

    tap(&mut sim, Key::A);
    assert_eq!(sim.duty(Circuit::Hallway), 43_500);
    tap(&mut sim, Key::B);
    tap(&mut sim, Key::B);
    assert_eq!(sim.duty(Circuit::Hallway), 36_500);

    tap(&mut sim, Key::Star);
    assert!(!sim.slave_devices().unwrap().hallway);
    assert_eq!(sim.duty(Circuit::Hallway), 2);
}

#[tokio::test]
async fn test_master_relays_follow_keys() {
    let mut sim = booted(&settings());

    tap(&mut sim, Key::Num4);
    tap(&mut sim, Key::Num9);
    assert!(sim.relay(Relay::Lamp));
    assert!(sim.relay(Relay::Fan));
    assert!(!sim.relay(Relay::Pole));

    tap(&mut sim, Key::Hash);
    assert!(!sim.relay(Relay::Lamp));
    assert!(!sim.relay(Relay::Fan));
    assert!(sim.master_devices().unwrap().is_all_off());
}

#[tokio::test]
async fn test_presence_reaches_master() {
    let mut sim = booted(&settings());

    sim.set_presence(Circuit::Bathroom, true).unwrap();
    sim.step().unwrap();
    assert!(sim.master_devices().unwrap().bathroom);
    assert_eq!(sim.duty(Circuit::Bathroom), 40_000);
    assert!(!sim.slave_devices().unwrap().bathroom);

    sim.set_presence(Circuit::Bathroom, false).unwrap();
    sim.step().unwrap();
    assert!(!sim.master_devices().unwrap().bathroom);
    assert_eq!(sim.duty(Circuit::Bathroom), 2);
}

#[tokio::test]
async fn test_presence_ignored_while_switched_on() {
    let mut sim = booted(&settings());
    tap(&mut sim, Key::Num0);
    let delivered = sim.report().unwrap().slave.wire.delivered;

    sim.set_presence(Circuit::Bathroom, true).unwrap();
    sim.step().unwrap();
    sim.set_presence(Circuit::Bathroom, false).unwrap();
    sim.step().unwrap();

    assert_eq!(sim.report().unwrap().slave.wire.delivered, delivered);
    assert_eq!(sim.duty(Circuit::Bathroom), 40_000);
    assert!(sim.master_devices().unwrap().bathroom);
}

#[tokio::test]
async fn test_slave_reboot_clears_master_belief() {
    let mut sim = booted(&settings());
    tap(&mut sim, Key::Star);
    tap(&mut sim, Key::Num4);
    assert!(sim.master_devices().unwrap().hallway);

    sim.reboot_slave().unwrap();
    assert_eq!(sim.duty(Circuit::Hallway), 2);
    sim.step().unwrap();

    let devices = sim.master_devices().unwrap();
    assert!(!devices.hallway);
    assert!(devices.lamp);
    assert_eq!(sim.selected().unwrap(), None);
    assert!(!sim.slave_devices().unwrap().hallway);
    assert_eq!(sim.report().unwrap().slave.boots, 2);
}

#[tokio::test]
async fn test_scheduled_reboot() {
    let mut settings = settings();
    settings.simulation.ticks = 20;
    settings.simulation.keys = vec![KeyPress {
        tick: 2,
        key: '0',
        hold: 2,
    }];
    settings.simulation.slave_reboots = vec![10];

    let report = run(&settings).await.unwrap();

    assert_eq!(report.slave.boots, 2);
    assert!(!report.master.devices.bathroom);
    assert!(!report.slave.devices.bathroom);
    assert_eq!(report.slave.duty.bathroom, 2);
}

#[tokio::test]
async fn test_lost_bytes_leave_nodes_out_of_step() {
    let mut settings = settings();
    settings.link.loss_rate = 1.0;
    let mut sim = booted(&settings);

    tap(&mut sim, Key::Star);

    assert!(sim.master_devices().unwrap().hallway);
    assert!(!sim.slave_devices().unwrap().hallway);
    let report = sim.report().unwrap();
    assert_eq!(report.master.wire.lost, 1);
    assert_eq!(report.slave.wire.lost, 1);
}

#[tokio::test]
async fn test_scripted_presence_and_injection() {
    let mut settings = settings();
    settings.simulation.ticks = 10;
    settings.simulation.presence = vec![PresenceChange {
        tick: 2,
        circuit: Circuit::Hallway,
        present: true,
    }];
    settings.simulation.injected = vec![InjectedByte { tick: 6, byte: '-' }];

    let mut sim = Simulator::new(&settings).unwrap();
    for _ in 0..5 {
        sim.step().unwrap();
    }
    sim.inject_to_master(b'$');
    sim.step().unwrap();
    assert!(sim.master_devices().unwrap().hallway);
    assert!(sim.master_devices().unwrap().bathroom);

    let report = sim.run().await.unwrap();
    assert_eq!(report.ticks, 10);
    assert!(!report.master.devices.bathroom);
}

#[tokio::test]
async fn test_random_motion_is_reported() {
    let mut settings = settings();
    settings.simulation.ticks = 200;
    settings.simulation.motion_probability = 0.2;

    let report = run(&settings).await.unwrap();

    assert!(report.slave.wire.delivered > 1);
    assert!(!report.slave.devices.hallway);
    assert!(!report.slave.devices.bathroom);
}

#[tokio::test]
async fn test_realtime_pacing() {
    let mut settings = settings();
    settings.simulation.ticks = 5;
    settings.simulation.realtime = true;

    let report = run(&settings).await.unwrap();
    assert_eq!(report.ticks, 5);
}

#[test]
fn test_invalid_script_is_rejected() {
    let mut bad_key = settings();
    bad_key.simulation.keys = vec![KeyPress {
        tick: 0,
        key: 'x',
        hold: 1,
    }];
    assert!(matches!(
        Simulator::new(&bad_key),
        Err(SimulationError::Node(Error::InvalidKey('x')))
    ));

    let mut bad_byte = settings();
    bad_byte.simulation.injected = vec![InjectedByte { tick: 0, byte: 'x' }];
    assert!(matches!(
        Simulator::new(&bad_byte),
        Err(SimulationError::Protocol(_))
    ));
}

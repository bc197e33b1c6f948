use homelink_api::Circuit;
use serde::{Deserialize, Serialize};

/// Flags held in the Master's device register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MasterDevice {
    Speaker,
    Desk1,
    Desk2,
    Desk3,
    Lamp,
    Pole,
    Relay3,
    Relay4,
    Fan,
    Hallway,
    Bathroom,
    /// Toggled by keypad `C`, not wired to anything
    ButtonC,
    /// Toggled by keypad `D`, not wired to anything
    ButtonD,
}

impl MasterDevice {
    /// Flags cleared by the all-off key. The dead button toggles survive it.
    pub const TOGGLEABLE: [MasterDevice; 11] = [
        MasterDevice::Speaker,
        MasterDevice::Desk1,
        MasterDevice::Desk2,
        MasterDevice::Desk3,
        MasterDevice::Lamp,
        MasterDevice::Pole,
        MasterDevice::Relay3,
        MasterDevice::Relay4,
        MasterDevice::Fan,
        MasterDevice::Hallway,
        MasterDevice::Bathroom,
    ];

    pub fn from_circuit(circuit: Circuit) -> Self {
        match circuit {
            Circuit::Hallway => MasterDevice::Hallway,
            Circuit::Bathroom => MasterDevice::Bathroom,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterDevices {
    pub speaker: bool,
    pub desk1: bool,
    pub desk2: bool,
    pub desk3: bool,
    pub lamp: bool,
    pub pole: bool,
    pub relay3: bool,
    pub relay4: bool,
    pub fan: bool,
    pub hallway: bool,
    pub bathroom: bool,
    pub button_c: bool,
    pub button_d: bool,
}

impl MasterDevices {
    fn flag_mut(&mut self, device: MasterDevice) -> &mut bool {
        match device {
            MasterDevice::Speaker => &mut self.speaker,
            MasterDevice::Desk1 => &mut self.desk1,
            MasterDevice::Desk2 => &mut self.desk2,
            MasterDevice::Desk3 => &mut self.desk3,
            MasterDevice::Lamp => &mut self.lamp,
            MasterDevice::Pole => &mut self.pole,
            MasterDevice::Relay3 => &mut self.relay3,
            MasterDevice::Relay4 => &mut self.relay4,
            MasterDevice::Fan => &mut self.fan,
            MasterDevice::Hallway => &mut self.hallway,
            MasterDevice::Bathroom => &mut self.bathroom,
            MasterDevice::ButtonC => &mut self.button_c,
            MasterDevice::ButtonD => &mut self.button_d,
        }
    }

    pub fn is_on(&self, device: MasterDevice) -> bool {
        match device {
            MasterDevice::Speaker => self.speaker,
            MasterDevice::Desk1 => self.desk1,
            MasterDevice::Desk2 => self.desk2,
            MasterDevice::Desk3 => self.desk3,
            MasterDevice::Lamp => self.lamp,
            MasterDevice::Pole => self.pole,
            MasterDevice::Relay3 => self.relay3,
            MasterDevice::Relay4 => self.relay4,
            MasterDevice::Fan => self.fan,
            MasterDevice::Hallway => self.hallway,
            MasterDevice::Bathroom => self.bathroom,
            MasterDevice::ButtonC => self.button_c,
            MasterDevice::ButtonD => self.button_d,
        }
    }

    pub fn set(&mut self, device: MasterDevice, on: bool) {
        *self.flag_mut(device) = on;
    }

    /// Flips a flag and returns its new value.
    pub fn toggle(&mut self, device: MasterDevice) -> bool {
        let flag = self.flag_mut(device);
        *flag = !*flag;
        *flag
    }

    pub fn is_all_off(&self) -> bool {
        *self == Self::default()
    }

    pub fn any_circuit_on(&self) -> bool {
        self.hallway || self.bathroom
    }
}

/// The Slave's own belief about which circuits were switched on remotely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlaveDevices {
    pub hallway: bool,
    pub bathroom: bool,
}

impl SlaveDevices {
    pub fn is_on(&self, circuit: Circuit) -> bool {
        match circuit {
            Circuit::Hallway => self.hallway,
            Circuit::Bathroom => self.bathroom,
        }
    }

    pub fn set(&mut self, circuit: Circuit, on: bool) {
        match circuit {
            Circuit::Hallway => self.hallway = on,
            Circuit::Bathroom => self.bathroom = on,
        }
    }
}

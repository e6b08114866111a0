//! Action for [`GymboyEnv`](crate::GymboyEnv).
use crate::emulator::Button;
use gymboy_core::Act;
use num_traits::FromPrimitive;

/// Number of discrete actions shared by every title.
pub const N_ACTIONS: usize = 9;

/// The discrete action set: no button, or exactly one button press.
#[derive(Copy, Clone, Debug, PartialEq, Eq, num_derive::FromPrimitive)]
#[repr(u8)]
pub enum GymboyAction {
    Noop = 0,
    A = 1,
    B = 2,
    Left = 3,
    Right = 4,
    Up = 5,
    Down = 6,
    Start = 7,
    Select = 8,
}

impl GymboyAction {
    /// Decodes an action index, `None` if it is outside of `0..N_ACTIONS`.
    pub fn from_index(ix: u8) -> Option<Self> {
        Self::from_u8(ix)
    }

    /// The button pressed by this action.
    pub fn button(&self) -> Option<Button> {
        match self {
            Self::Noop => None,
            Self::A => Some(Button::A),
            Self::B => Some(Button::B),
            Self::Left => Some(Button::Left),
            Self::Right => Some(Button::Right),
            Self::Up => Some(Button::Up),
            Self::Down => Some(Button::Down),
            Self::Start => Some(Button::Start),
            Self::Select => Some(Button::Select),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Action for [`GymboyEnv`](crate::GymboyEnv), an index into the action set.
pub struct GymboyAct {
    pub act: u8,
}

impl GymboyAct {
    pub fn new(act: u8) -> Self {
        Self { act }
    }
}

impl Act for GymboyAct {
    fn len(&self) -> usize {
        1
    }
}

impl From<u8> for GymboyAct {
    fn from(act: u8) -> Self {
        Self { act }
    }
}

impl From<GymboyAction> for GymboyAct {
    fn from(action: GymboyAction) -> Self {
        Self { act: action as u8 }
    }
}

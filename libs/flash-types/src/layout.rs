use soroban_sdk::{contracttype, Env, Symbol, Vec};

/// Type of a persisted slot. Each kind has a fixed encoded width.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum SlotKind {
    Address = 0,
    I128 = 1,
    U32 = 2,
    Bool = 3,
}

impl SlotKind {
    /// Encoded width in bytes
    pub fn width(&self) -> u32 {
        match self {
            SlotKind::Address => 32,
            SlotKind::I128 => 16,
            SlotKind::U32 => 4,
            SlotKind::Bool => 1,
        }
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SlotDescriptor {
    pub name: Symbol,
    pub kind: SlotKind,
}

/// Versioned description of the pool record's persisted slots
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StorageLayout {
    pub version: u32,
    pub slots: Vec<SlotDescriptor>,
}

impl StorageLayout {
    /// Total encoded width of all slots
    pub fn width(&self) -> u32 {
        self.slots.iter().map(|slot| slot.kind.width()).sum()
    }
}

// Slot indices of the pool record (layout v1)
pub const SLOT_ASSET: u32 = 0;
pub const SLOT_SHARE_SUPPLY: u32 = 1;
pub const SLOT_EXCHANGE_RATE: u32 = 2;
pub const SLOT_IS_ALLOWED: u32 = 3;
pub const SLOT_ACTIVE_LOAN: u32 = 4;
pub const SLOT_TOTAL_FEES: u32 = 5;

pub const POOL_LAYOUT_VERSION: u32 = 1;

/// Layout of the pool record written by this code version
pub fn pool_layout_v1(env: &Env) -> StorageLayout {
    let mut slots = Vec::new(env);
    slots.push_back(slot(env, "asset", SlotKind::Address));
    slots.push_back(slot(env, "share_supply", SlotKind::I128));
    slots.push_back(slot(env, "exchange_rate", SlotKind::I128));
    slots.push_back(slot(env, "is_allowed", SlotKind::Bool));
    slots.push_back(slot(env, "active_loan", SlotKind::Bool));
    slots.push_back(slot(env, "total_fees", SlotKind::I128));

    StorageLayout {
        version: POOL_LAYOUT_VERSION,
        slots,
    }
}

pub fn slot(env: &Env, name: &str, kind: SlotKind) -> SlotDescriptor {
    SlotDescriptor {
        name: Symbol::new(env, name),
        kind,
    }
}

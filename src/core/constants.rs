/// Left edge of the play area
pub const BASE_X: i32 = 25;

/// Top edge of the play area
pub const BASE_Y: i32 = 70;

/// Width of the play area measured from `BASE_X`
pub const MAX_OFFSET_X: i32 = 590;

/// Height of the play area measured from `BASE_Y`
pub const MAX_OFFSET_Y: i32 = 385;

/// Players closer than this to the coin pick it up
pub const COLLISION_RADIUS: f64 = 12.0;

/// Distance covered by a single movement intent
pub const PLAYER_SPEED: i32 = 20;

/// Score awarded for picking up a coin
pub const COIN_VALUE: u32 = 1;

/// Upper bound (exclusive) for random coin ids
pub const MAX_COIN_ID: u32 = 1_000_000;

/// Display colors handed out to connected players
pub const DEFAULT_PALETTE: [&str; 6] = [
    "#c9a3ff", "#5eff7c", "#96fcff", "#e39802", "#ffffff", "#ffc9fa",
];

/// Tries at placing a replacement coin away from the old one
pub const RESPAWN_ATTEMPTS: usize = 32;

/// Largest inbound WebSocket text frame accepted by default
pub const DEFAULT_MAX_MESSAGE_BYTES: usize = 1024;

/// Snapshots buffered per subscriber before it starts lagging
pub const BROADCAST_CAPACITY: usize = 100;

/// Error replies queued per connection before further ones are dropped
pub const DIRECT_REPLY_CAPACITY: usize = 16;

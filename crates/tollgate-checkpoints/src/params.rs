//! Compiled-in checkpoint tables for each network.
//!
//! What makes a good checkpoint block?
//! - It is surrounded by blocks with reasonable timestamps (no block before
//!   it has a later timestamp, no block after it an earlier one).
//! - It contains no strange transactions.
//!
//! Adding a checkpoint is a one-line change to the relevant pin list plus an
//! update of that network's [`CheckpointStats`].

use hex_literal::hex;

use crate::table::{CheckpointStats, CheckpointTable};

/// Mainnet pins: (height, block hash).
pub const MAINNET_CHECKPOINTS: &[(u64, [u8; 32])] = &[
    (0, hex!("00000f639db5734b2b861ef8dbccc33aebd7de44d13de000a12d093bcc866c64")),
    (6143, hex!("0000000026fb51f5bc9943ed69d9ff7697ecf7fed419d88b417655f93a487ce1")),
    (12797, hex!("000000002c29644e179baa188fa6b9b9454721f1f21f2b9f31eebe9acc1a31db")),
    (30092, hex!("0000000098a23e1c503f71a6d61c333c5abaabb4c5fa1b474012e004db4bfbbe")),
    (80998, hex!("000000010ebcfe9a00a99f2b61104f4a141555a707f1c007aba8a978f6030cfb")),
    (144759, hex!("000000047e7b7bfd63b4f019a0a24c8d65b10afa6eb80721e10fa7c49ce6fb6e")),
    (189046, hex!("00000000bd507c435b46ee8a13b25b85ec38fdb0eb5b00faeaa0611cd6a483d3")),
    (277316, hex!("00000016a20503fe496e79d34fb85c33f633059315c046ffa1b4826d08a1e856")),
    (483849, hex!("000001eb7f8124282ab62296e63d3145ff6c84cf18afae4d4b8e02cd3182b6a8")),
    (1066428, hex!("000000012dc5256d977b50270d1ca5642726308dcf26b6c219985edb8f2ab8f6")),
];

/// Mainnet statistics as of height 1066428.
pub const MAINNET_STATS: CheckpointStats = CheckpointStats::new(
    1_490_629_503, // timestamp of the last checkpoint block
    1_179_921,     // transactions between genesis and the last checkpoint
    960.0,         // estimated transactions per day after the checkpoint
);

pub const TESTNET_CHECKPOINTS: &[(u64, [u8; 32])] = &[(
    0,
    hex!("0000082f5939c2154dbcba35f784530d12e9d72472fcfaf29674ea312cdf4c83"),
)];

pub const TESTNET_STATS: CheckpointStats = CheckpointStats::new(1_388_868_139, 0, 960.0);

pub const REGTEST_CHECKPOINTS: &[(u64, [u8; 32])] = &[(
    0,
    hex!("000008ca1832a4baf228eb1553c03d3a2c8e02399550dd6ea8d65cec3ef23d2e"),
)];

pub const REGTEST_STATS: CheckpointStats = CheckpointStats::ZERO;

pub fn mainnet() -> CheckpointTable {
    CheckpointTable::from_static(MAINNET_CHECKPOINTS, MAINNET_STATS)
}

pub fn testnet() -> CheckpointTable {
    CheckpointTable::from_static(TESTNET_CHECKPOINTS, TESTNET_STATS)
}

pub fn regtest() -> CheckpointTable {
    CheckpointTable::from_static(REGTEST_CHECKPOINTS, REGTEST_STATS)
}

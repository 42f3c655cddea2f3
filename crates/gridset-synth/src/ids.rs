//! ---
//! ems_section: "11-simulation"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Synthetic grid dataset generation and table rewriting."
//! ems_version: "v0.1.0"
//! ems_owner: "tbd"
//! ---
use rand::Rng;
use uuid::Builder;

use crate::catalog::AssetKind;

pub const SEPARATOR: char = '-';

/// Hex characters kept from the random UUID.
pub const TOKEN_LEN: usize = 8;

/// Build an asset identifier such as `SUB-1A2B3C4D`.
///
/// The token is the upper-cased head of a random v4 UUID drawn from `rng`.
/// Collisions are not checked.
pub fn generate_id<R: Rng + ?Sized>(rng: &mut R, kind: AssetKind) -> String {
    let uuid = Builder::from_random_bytes(rng.gen()).into_uuid();
    let hex = uuid.simple().to_string();
    format!(
        "{}{}{}",
        kind.prefix(),
        SEPARATOR,
        hex[..TOKEN_LEN].to_ascii_uppercase()
    )
}

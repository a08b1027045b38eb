use rand::rngs::StdRng;
use rand::SeedableRng;
use terrascript_terrain::MeshResult;

use crate::contract::ScriptContext;

mod altitude;
mod colours;
mod perturb;

#[cfg(test)]
mod test;

pub use altitude::ColourByAltitude;
pub use colours::RandomColours;
pub use perturb::PerturbHeights;

/// A mutation pass over a mesh, run by the host.
///
/// Scripts are short sequential procedures. They query the vertex count
/// once, enumerate indices in order, mutate per-vertex state through the
/// context, and finally signal the display. A failed mesh call propagates
/// out of `run` and aborts the pass; scripts do not recover or retry.
pub trait Script {
    /// The name the script is registered under.
    fn name(&self) -> &'static str;

    /// Run one mutation pass against the given context.
    fn run(&mut self, ctx: &mut ScriptContext<'_>) -> MeshResult<()>;
}

/// The built-in scripts, as name and description pairs.
pub const BUILTINS: &[(&str, &str)] = &[
    ("colours", "randomise the surface colour of every vertex"),
    ("perturb", "jitter the height of every vertex"),
    ("altitude", "colour every vertex by its height band"),
];

/// Build the RNG for a script, from an explicit seed or from entropy.
fn seeded(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

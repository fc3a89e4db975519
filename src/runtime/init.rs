//! Parallel pseudo-random initialization of the amplitude buffer.

use num_complex::Complex64;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

/// Fills `amps` with pseudo-random amplitudes, real and imaginary parts
/// drawn independently and uniformly from [0, 1).
///
/// The index range is split into `workers` contiguous blocks of
/// `len / workers` slots; the last block absorbs the division remainder,
/// so every slot is written exactly once. Each rank owns its own
/// generator, seeded by the rank itself rather than wall-clock time, so
/// no generator state is shared across threads.
///
/// Output is reproducible for a fixed worker count. It is NOT
/// reproducible across different worker counts, since the seed-to-slot
/// mapping moves with the block boundaries; this is accepted, not a bug.
pub fn fill_random(amps: &mut [Complex64], workers: usize) {
    if amps.is_empty() {
        return;
    }
    let workers = workers.clamp(1, amps.len());
    let block = amps.len() / workers;

    let mut blocks = Vec::with_capacity(workers);
    let mut rest = amps;
    for rank in 0..workers {
        // last rank takes block + remainder
        let take = if rank + 1 == workers { rest.len() } else { block };
        let (head, tail) = std::mem::take(&mut rest).split_at_mut(take);
        blocks.push((rank, head));
        rest = tail;
    }

    blocks.into_par_iter().for_each(|(rank, slots)| {
        let mut rng = ChaCha8Rng::seed_from_u64(rank as u64);
        for amp in slots {
            let re: f64 = rng.gen();
            let im: f64 = rng.gen();
            *amp = Complex64::new(re, im);
        }
    });
}

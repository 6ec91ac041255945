//! Test that mapping an immediate handle never yields a deferred one.

use chainwrap::chain::{Deferred, chain};

fn main() {
    // map keeps the mode of the receiver
    let _: Deferred<i32> = chain(1).map(|value| value + 1);
}

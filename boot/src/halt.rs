/// Terminal idle for the firmware stage.
use core::sync::atomic::{compiler_fence, Ordering};

/// Never return. The fence is a side effect the optimiser must keep, so
/// the loop is neither removed nor assumed to terminate.
pub fn spin_forever() -> ! {
    loop {
        compiler_fence(Ordering::SeqCst);
        core::hint::spin_loop();
    }
}

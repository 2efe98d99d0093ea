/*!

# Overview

Leveled, threshold-filtered logging for the expression core. The log level says what _kind_ of message is emitted,
and the numeric threshold says how _verbose_ the logger must be for the message to be emitted.

The term and sort tables log sparingly and only at high thresholds: manager creation and teardown, datatype
declaration and instantiation, and batches of evicted nodes. None of that is emitted at the default threshold of 3
except manager lifecycle messages logged at 2 or below.

```
use smtexpr::log::*;

fn main() {
    // Only messages logged at a threshold of at most 1 are emitted.
    set_global_logging_threshold(1);

    debug!(0, "Always emitted.");
    info!(1, "Interned {} nodes.", 12);        // Emitted
    trace!(5, "Evicted node {}.", 7);          // Not emitted
    warning!("Threshold defaults to zero.");   // Emitted
}
```

## Threshold

Higher threshold values mean more verbose logging. A message logged at threshold `t` is emitted only when
`t <= get_global_logging_threshold()`. A message with threshold 0 is always emitted. The global threshold is one value
shared by all levels and is stored atomically.

## Levels

Critical, Error, Warning, Info, Debug, Trace, through the macros `critical!`, `error!`, `warning!`, `info!`,
`debug!`, `trace!`:

```ignore
// With threshold
level!(threshold, "format string", args...);

// Without threshold (indicates threshold of 0, always emitted)
level!("format string", args...);
```

The subscriber is installed lazily by the first macro invocation. There is nothing to initialize by hand.

*/
mod formatter;
mod threshold_filter;
mod macros;

use std::sync::{
    atomic::{AtomicU8, Ordering},
    LazyLock
  };

use tracing_subscriber::{
  fmt,
  layer::SubscriberExt,
  Registry
};

use threshold_filter::ThresholdFilterLayer;
use formatter::CustomFieldFormatter;
pub use macros::*;

#[doc(hidden)]
pub use tracing as __tracing;

/// Default verbosity. Manager lifecycle messages are logged at 2, table internals at 3 and above.
pub const DEFAULT_LOGGING_THRESHOLD: u8 = 3;

/// Used for implicit initialization.
static INIT_LOGGER: LazyLock<()> = LazyLock::new(|| {
  let subscriber = Registry::default()
      .with(ThresholdFilterLayer)
      .with(
        fmt::layer()
            .fmt_fields(CustomFieldFormatter)
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr),
      );

  // Another subscriber may already be installed by the embedding application, in which case we defer to it.
  let _ = tracing::subscriber::set_global_default(subscriber);
});

/// This does not need to be called directly. Initializes the logging system.
pub fn init_logger() {
  LazyLock::force(&INIT_LOGGER);
}

static GLOBAL_LOGGING_THRESHOLD: AtomicU8 = AtomicU8::new(DEFAULT_LOGGING_THRESHOLD);

/// Sets the global threshold. May be called before or after the logger is initialized.
pub fn set_global_logging_threshold(new_threshold: u8) {
  GLOBAL_LOGGING_THRESHOLD.store(new_threshold, Ordering::SeqCst);
}

/// Retrieves the global threshold.
pub fn get_global_logging_threshold() -> u8 {
  GLOBAL_LOGGING_THRESHOLD.load(Ordering::SeqCst)
}

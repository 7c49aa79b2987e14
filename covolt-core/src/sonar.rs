//! Ultrasonic ranging.
//!
//! The kit's HC-SR04-style ranger hangs off two edge pins: a trigger output
//! and an echo input. One measurement fires five trigger/echo cycles and
//! reduces the five scaled pulse widths with a trimmed mean, which discards
//! single-cycle echo jitter without the cost of a real median-of-N filter.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};

/// Echo-line timeout. Pulses longer than this read as out of range.
pub const DEFAULT_TIMEOUT_US: u32 = 43_200;

/// Divisor converting an echo pulse width in microseconds to the device
/// distance unit (round-trip speed of sound).
const US_PER_UNIT: u32 = 40;

/// Trigger/echo cycles per measurement.
const SAMPLE_COUNT: usize = 5;

/// Blocking pulse-width measurement on an input line.
///
/// The platform layer implements this over its timer hardware. The
/// implementation must bound the wait: when no pulse at `level` completes
/// within `timeout_us`, it returns `0` instead of blocking forever.
pub trait PulseRead {
    type Error: core::fmt::Debug;

    /// Wait for one pulse at `level` and return its width in microseconds,
    /// or `0` on timeout.
    fn measure_pulse_us(&mut self, level: PinState, timeout_us: u32) -> Result<u32, Self::Error>;
}

/// Errors surfaced by a ranging cycle.
#[derive(Debug)]
pub enum SonarError<T: core::fmt::Debug, E: core::fmt::Debug> {
    /// The trigger output could not be driven.
    Trigger(T),
    /// The echo line could not be measured.
    Echo(E),
}

/// Driver for the trigger/echo ultrasonic ranger.
///
/// Fully sequential and blocking: the trigger and echo lines are a single
/// shared pair, so cycles cannot be interleaved.
pub struct Sonar<TRIG, ECHO, D> {
    trigger: TRIG,
    echo: ECHO,
    delay: D,
    timeout_us: u32,
}

impl<TRIG, ECHO, D> Sonar<TRIG, ECHO, D>
where
    TRIG: OutputPin,
    ECHO: PulseRead,
    D: DelayNs,
{
    pub fn new(trigger: TRIG, echo: ECHO, delay: D) -> Self {
        Self::with_timeout(trigger, echo, delay, DEFAULT_TIMEOUT_US)
    }

    /// Override the echo timeout, e.g. to shorten the worst-case latency
    /// when only near obstacles matter.
    pub fn with_timeout(trigger: TRIG, echo: ECHO, delay: D, timeout_us: u32) -> Self {
        Self {
            trigger,
            echo,
            delay,
            timeout_us,
        }
    }

    /// Measure the distance to the nearest obstacle, in device units.
    ///
    /// Runs five trigger/echo cycles and returns the trimmed mean of the
    /// five scaled samples. A timed-out cycle contributes a `0` sample.
    /// Worst-case latency is five trigger pulses plus five echo timeouts.
    pub fn measure(&mut self) -> Result<u32, SonarError<TRIG::Error, ECHO::Error>> {
        let mut samples = [0u32; SAMPLE_COUNT];

        for sample in samples.iter_mut() {
            self.trigger.set_low().map_err(SonarError::Trigger)?;
            self.delay.delay_us(2);
            self.trigger.set_high().map_err(SonarError::Trigger)?;
            self.delay.delay_us(15);
            self.trigger.set_low().map_err(SonarError::Trigger)?;

            let pulse = self
                .echo
                .measure_pulse_us(PinState::High, self.timeout_us)
                .map_err(SonarError::Echo)?;
            if pulse == 0 {
                tracing::warn!("sonar echo timed out");
            }
            *sample = pulse / US_PER_UNIT;
        }

        Ok(trimmed_mean(samples))
    }

    /// Release the pins and delay.
    pub fn free(self) -> (TRIG, ECHO, D) {
        (self.trigger, self.echo, self.delay)
    }
}

/// Average of the middle three of five samples.
fn trimmed_mean(mut samples: [u32; SAMPLE_COUNT]) -> u32 {
    samples.sort_unstable();
    (samples[1] + samples[2] + samples[3]) / 3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trimmed_mean_drops_min_and_max() {
        assert_eq!(trimmed_mean([10, 12, 11, 50, 9]), 11);
    }

    #[test]
    fn trimmed_mean_is_idempotent_on_constant_input() {
        assert_eq!(trimmed_mean([20, 20, 20, 20, 20]), 20);
    }

    #[test]
    fn trimmed_mean_floors_the_average() {
        assert_eq!(trimmed_mean([1, 2, 2, 3, 9]), 2);
    }

    #[test]
    fn timeout_sentinel_flows_through_as_zero() {
        // one timed-out cycle lands in the discarded minimum slot
        assert_eq!(trimmed_mean([0, 20, 20, 20, 20]), 20);
    }
}

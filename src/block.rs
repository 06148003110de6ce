//! Per-tick input block classification.

/// One tick's worth of input, classified by channel presence.
///
/// The host delivers a fixed-size buffer of samples per channel each tick.
/// Channel 0 carries the X (reference) signal, channel 1 the Y (signal)
/// channel. A well-formed tick has both channels present with equal length.
/// The remaining cases are host conditions the processor handles explicitly
/// rather than guessing at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlockInput<'a> {
    /// No usable input this tick.
    ///
    /// Occurs occasionally while the host graph is settling. Transient,
    /// not an error - processing continues on the next tick.
    Absent,

    /// The reference channel arrived but the signal channel is missing.
    ///
    /// Malformed input; fatal to the processor instance.
    MissingSignal {
        /// The reference samples that did arrive.
        x: &'a [f32],
    },

    /// Both channels present.
    Stereo {
        /// Reference (X) channel samples.
        x: &'a [f32],
        /// Signal (Y) channel samples.
        y: &'a [f32],
    },
}

impl<'a> BlockInput<'a> {
    /// Classifies a tick's input channels.
    ///
    /// An empty slice counts as an absent channel: hosts deliver empty
    /// channel buffers when a graph input is not connected.
    #[must_use]
    pub fn classify(channels: &'a [&'a [f32]]) -> Self {
        let x = channels.first().copied().filter(|c| !c.is_empty());
        let y = channels.get(1).copied().filter(|c| !c.is_empty());

        match (x, y) {
            (Some(x), Some(y)) => Self::Stereo { x, y },
            (Some(x), None) => Self::MissingSignal { x },
            // A signal channel without a reference channel is treated the
            // same as no input at all.
            (None, _) => Self::Absent,
        }
    }
}

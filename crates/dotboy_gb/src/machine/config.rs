use typed_builder::TypedBuilder;

use crate::SAMPLE_RATE;

/// Construction-time knobs for [`GameBoy`](super::GameBoy).
///
/// ```
/// use dotboy_gb::GameBoyConfig;
///
/// let config = GameBoyConfig::builder().render_audio(false).build();
/// assert!(config.render_graphics);
/// ```
#[derive(Clone, Debug, TypedBuilder)]
pub struct GameBoyConfig {
    /// Run the scanline renderer. When off the frame buffer keeps its last
    /// contents but LCD timing and interrupts are unchanged.
    #[builder(default = true)]
    pub render_graphics: bool,
    /// Queue mixed audio samples. When off the APU still runs.
    #[builder(default = true)]
    pub render_audio: bool,
    /// Output rate in Hz.
    #[builder(default = SAMPLE_RATE)]
    pub sample_rate: u32,
    /// Queue size in `i16` samples (two per stereo frame).
    #[builder(default = 16_384)]
    pub audio_queue_capacity: usize,
    /// Seed for the power-on WRAM/HRAM contents.
    #[builder(default = 0xD07B_0000)]
    pub wram_seed: u64,
}

impl Default for GameBoyConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

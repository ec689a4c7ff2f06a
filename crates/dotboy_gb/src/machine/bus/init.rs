use rand::{rngs::StdRng, RngCore, SeedableRng};

use super::GameBoyBus;

impl GameBoyBus {
    /// WRAM and HRAM hold garbage at power-on. A seeded generator keeps runs
    /// reproducible while software still cannot rely on zeros.
    pub(super) fn randomize_internal_ram(&mut self, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        rng.fill_bytes(&mut self.wram);
        rng.fill_bytes(&mut self.hram);
    }

    /// I/O state the boot image leaves behind at 0x0100, applied directly.
    pub(crate) fn apply_post_boot_state(&mut self) {
        self.boot_rom_active = false;
        self.interrupts.write_if(0x01);
        self.interrupts.enable = 0x00;
        self.timer.apply_post_boot_state();
        self.apu.apply_post_boot_state();
        self.write_io(0xFF47, 0xFC);
        self.write_io(0xFF40, 0x91);
    }
}

//! Interrupt groups as 32-bit bitmaps.
//!
//! Each group is four consecutive registers. Register `first + i` maps to
//! bits `8*i .. 8*i + 8` of the bitmap. None of them has a cache slot.

use crate::pmic::{
    PmicError, Stpmic,
    registers::{
        INT_CLEAR_R1, INT_GROUP_LEN, INT_MASK_CLEAR_R1, INT_MASK_R1, INT_MASK_SET_R1,
        INT_PENDING_R1, INT_SRC_R1,
    },
    transport::Transport,
};

macro_rules! impl_interrupt_read {
    ($($name:ident => $first:ident, $what:literal;)*) => {
        paste::paste! {
            impl<T: Transport> Stpmic<T> {
                $(
                    #[doc = "Reads the " $what " bitmap from the four `" $first "` registers."]
                    pub fn $name(&mut self) -> Result<u32, PmicError> {
                        self.read_group($first)
                    }
                )*
            }
        }
    };
}

macro_rules! impl_interrupt_write {
    ($($name:ident => $first:ident, $what:literal;)*) => {
        paste::paste! {
            impl<T: Transport> Stpmic<T> {
                $(
                    #[doc = $what " the bits set in `bits`. Zero bytes are not sent."]
                    pub fn $name(&mut self, bits: u32) -> Result<(), PmicError> {
                        self.write_group($first, bits)
                    }
                )*
            }
        }
    };
}

impl_interrupt_read! {
    interrupt_pending => INT_PENDING_R1, "pending";
    interrupt_source => INT_SRC_R1, "source";
    interrupt_mask => INT_MASK_R1, "mask";
}

impl_interrupt_write! {
    interrupt_clear => INT_CLEAR_R1, "Clears pending interrupts for";
    interrupt_mask_set => INT_MASK_SET_R1, "Masks";
    interrupt_mask_clear => INT_MASK_CLEAR_R1, "Unmasks";
}

impl<T: Transport> Stpmic<T> {
    fn read_group(&mut self, first: u8) -> Result<u32, PmicError> {
        let mut bytes = [0u8; INT_GROUP_LEN as usize];
        for (offset, byte) in (0..INT_GROUP_LEN).zip(bytes.iter_mut()) {
            *byte = self.read(first + offset)?;
        }
        Ok(u32::from_le_bytes(bytes))
    }

    fn write_group(&mut self, first: u8, bits: u32) -> Result<(), PmicError> {
        for (offset, byte) in (0..INT_GROUP_LEN).zip(bits.to_le_bytes()) {
            if byte == 0 {
                continue;
            }
            self.write(first + offset, byte)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pmic::test_support::{ready_pmic, ready_pmic_with};

    #[test]
    fn read_places_each_register_at_its_offset() {
        let mut pmic = ready_pmic_with(|regs| {
            regs[INT_PENDING_R1 as usize] = 0x01;
            regs[INT_PENDING_R1 as usize + 1] = 0x02;
            regs[INT_PENDING_R1 as usize + 2] = 0x03;
            regs[INT_PENDING_R1 as usize + 3] = 0x80;
        });
        assert_eq!(pmic.interrupt_pending(), Ok(0x8003_0201));
        assert_eq!(pmic.transport().reads, 4);
    }

    #[test]
    fn each_read_group_uses_its_own_registers() {
        let mut pmic = ready_pmic_with(|regs| {
            regs[INT_SRC_R1 as usize + 2] = 0xAA;
            regs[INT_MASK_R1 as usize] = 0x0F;
        });
        assert_eq!(pmic.interrupt_source(), Ok(0x00AA_0000));
        assert_eq!(pmic.interrupt_mask(), Ok(0x0000_000F));
    }

    #[test]
    fn write_skips_zero_bytes() {
        let mut pmic = ready_pmic();
        pmic.interrupt_clear(0x1200_0034).unwrap();
        assert_eq!(
            pmic.transport().writes.as_slice(),
            &[(INT_CLEAR_R1, 0x34), (INT_CLEAR_R1 + 3, 0x12)]
        );
    }

    #[test]
    fn mask_set_and_clear_target_their_groups() {
        let mut pmic = ready_pmic();
        pmic.interrupt_mask_set(0x0000_FF00).unwrap();
        pmic.interrupt_mask_clear(0x0001_0000).unwrap();
        pmic.interrupt_mask_clear(0).unwrap();
        assert_eq!(
            pmic.transport().writes.as_slice(),
            &[(INT_MASK_SET_R1 + 1, 0xFF), (INT_MASK_CLEAR_R1 + 2, 0x01)]
        );
    }

    #[test]
    fn group_write_stops_at_first_failure() {
        let mut pmic = ready_pmic();
        pmic.transport_mut().fail.set(INT_CLEAR_R1 as usize + 1, true);
        assert_eq!(pmic.interrupt_clear(0xFFFF_FFFF), Err(PmicError::Timeout));
        assert_eq!(pmic.transport().written_regs().as_slice(), &[INT_CLEAR_R1]);
    }
}

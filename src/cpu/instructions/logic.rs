// Logic and bit operation instructions for 6502 CPU

use crate::bus::Bus;
use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;

impl Cpu {
    // ========================================
    // Logical Instructions
    // ========================================

    /// AND - Logical AND
    ///
    /// Performs a bitwise AND operation between the accumulator and a value from memory,
    /// storing the result in the accumulator.
    ///
    /// Formula: A = A & M
    ///
    /// This instruction is commonly used for:
    /// - Masking bits (clearing specific bits while preserving others)
    /// - Testing if specific bits are set
    /// - Isolating bit patterns
    ///
    /// Flags affected: Z, N
    /// - Z: Set if the result is zero
    /// - N: Set if bit 7 of the result is set
    ///
    /// # Arguments
    /// * `bus` - The memory bus to read from
    /// * `addr_result` - The addressing result containing the memory address or immediate value
    pub fn and(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        self.a &= value;
        self.update_zero_and_negative_flags(self.a);
    }

    /// ORA - Logical OR
    ///
    /// Performs a bitwise OR operation between the accumulator and a value from memory,
    /// storing the result in the accumulator.
    ///
    /// Formula: A = A | M
    ///
    /// This instruction is commonly used for:
    /// - Setting specific bits while preserving others
    /// - Combining bit patterns
    /// - Merging flags or options
    ///
    /// Flags affected: Z, N
    /// - Z: Set if the result is zero
    /// - N: Set if bit 7 of the result is set
    ///
    /// # Arguments
    /// * `bus` - The memory bus to read from
    /// * `addr_result` - The addressing result containing the memory address or immediate value
    pub fn ora(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        self.a |= value;
        self.update_zero_and_negative_flags(self.a);
    }

    /// EOR - Exclusive OR
    ///
    /// Performs a bitwise exclusive OR (XOR) operation between the accumulator and a value
    /// from memory, storing the result in the accumulator.
    ///
    /// Formula: A = A ^ M
    ///
    /// This instruction is commonly used for:
    /// - Toggling specific bits
    /// - Simple encryption/decryption
    /// - Comparing values (A EOR A = 0)
    /// - Swapping values in combination with other operations
    ///
    /// Flags affected: Z, N
    /// - Z: Set if the result is zero
    /// - N: Set if bit 7 of the result is set
    ///
    /// # Arguments
    /// * `bus` - The memory bus to read from
    /// * `addr_result` - The addressing result containing the memory address or immediate value
    pub fn eor(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        self.a ^= value;
        self.update_zero_and_negative_flags(self.a);
    }

    // ========================================
    // Bit Testing Instructions
    // ========================================

    /// BIT - Bit Test
    ///
    /// Tests bits in memory with the accumulator without modifying the accumulator.
    /// This instruction has unique flag behavior compared to other logical operations.
    ///
    /// The BIT instruction is special because:
    /// - It performs A & M but doesn't store the result
    /// - It directly copies bits 6 and 7 from memory to V and N flags
    /// - It sets Z flag based on the AND result
    ///
    /// This is commonly used for:
    /// - Testing the status of hardware registers
    /// - Checking specific bit patterns without modifying the accumulator
    /// - Reading overflow and negative flags from memory-mapped I/O
    ///
    /// Flags affected: Z, V, N
    /// - Z: Set if (A AND M) == 0 (result of AND is zero)
    /// - V: Set to bit 6 of the memory value (not the AND result)
    /// - N: Set to bit 7 of the memory value (not the AND result)
    ///
    /// # Arguments
    /// * `bus` - The memory bus to read from
    /// * `addr_result` - The addressing result containing the memory address
    ///
    /// # Note
    /// BIT instruction does not support immediate addressing mode.
    /// It always reads from memory, never from an immediate value.
    pub fn bit(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);

        // Test if A & M is zero
        let result = self.a & value;
        self.set_zero(result == 0);

        // Copy bit 6 of memory value to V flag
        self.set_overflow((value & 0x40) != 0);

        // Copy bit 7 of memory value to N flag
        self.set_negative((value & 0x80) != 0);
    }
}

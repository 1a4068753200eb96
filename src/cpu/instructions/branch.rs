// Branch instructions for 6502 CPU
// These instructions perform conditional branches based on processor status flags.
// All branch instructions use relative addressing mode and do not modify any flags.

use crate::bus::Bus;
use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;

impl Cpu {
    // ========================================
    // Branch Instructions
    // ========================================

    /// BCC - Branch if Carry Clear
    ///
    /// Branches if the Carry flag (C) is clear (0).
    ///
    /// This instruction is typically used after comparison or arithmetic operations
    /// to test if there was no carry/borrow. Common use cases:
    /// - After CMP: Branch if first operand < second operand (unsigned)
    /// - After ADC: Branch if there was no carry
    /// - After subtraction operations to check for no borrow
    ///
    /// Flags affected: None
    ///
    /// Cycles:
    /// - 2 cycles if branch not taken
    /// - 3 cycles if branch taken
    /// - 4 cycles if branch taken and crosses page boundary
    ///
    /// # Arguments
    /// * `bus` - The memory bus (for reading the branch offset)
    /// * `addr_result` - The addressing result containing the branch target address
    ///
    /// # Returns
    /// The number of additional cycles used (0, 1, or 2)
    ///
    /// # Example
    /// ```text
    /// CMP #$10    ; Compare A with $10
    /// BCC label   ; Branch if A < $10 (carry clear)
    /// ```
    pub fn bcc(&mut self, _bus: &Bus, addr_result: &AddressingResult) -> u8 {
        self.branch(!self.get_carry(), addr_result)
    }

    /// BCS - Branch if Carry Set
    ///
    /// Branches if the Carry flag (C) is set (1).
    ///
    /// This instruction is typically used after comparison or arithmetic operations
    /// to test if there was a carry/borrow. Common use cases:
    /// - After CMP: Branch if first operand >= second operand (unsigned)
    /// - After ADC: Branch if there was a carry
    /// - In multi-byte arithmetic operations
    ///
    /// Flags affected: None
    ///
    /// Cycles:
    /// - 2 cycles if branch not taken
    /// - 3 cycles if branch taken
    /// - 4 cycles if branch taken and crosses page boundary
    ///
    /// # Arguments
    /// * `bus` - The memory bus (for reading the branch offset)
    /// * `addr_result` - The addressing result containing the branch target address
    ///
    /// # Returns
    /// The number of additional cycles used (0, 1, or 2)
    ///
    /// # Example
    /// ```text
    /// CMP #$10    ; Compare A with $10
    /// BCS label   ; Branch if A >= $10 (carry set)
    /// ```
    pub fn bcs(&mut self, _bus: &Bus, addr_result: &AddressingResult) -> u8 {
        self.branch(self.get_carry(), addr_result)
    }

    /// BEQ - Branch if Equal (Zero Set)
    ///
    /// Branches if the Zero flag (Z) is set (1).
    ///
    /// This instruction is typically used after comparison or arithmetic operations
    /// to test if the result was zero. Common use cases:
    /// - After CMP: Branch if values are equal
    /// - After load operations: Branch if value is zero
    /// - Loop counters: Branch when counter reaches zero
    ///
    /// Flags affected: None
    ///
    /// Cycles:
    /// - 2 cycles if branch not taken
    /// - 3 cycles if branch taken
    /// - 4 cycles if branch taken and crosses page boundary
    ///
    /// # Arguments
    /// * `bus` - The memory bus (for reading the branch offset)
    /// * `addr_result` - The addressing result containing the branch target address
    ///
    /// # Returns
    /// The number of additional cycles used (0, 1, or 2)
    ///
    /// # Example
    /// ```text
    /// LDA counter ; Load counter value
    /// BEQ done    ; Branch if counter is zero
    /// ```
    pub fn beq(&mut self, _bus: &Bus, addr_result: &AddressingResult) -> u8 {
        self.branch(self.get_zero(), addr_result)
    }

    /// BNE - Branch if Not Equal (Zero Clear)
    ///
    /// Branches if the Zero flag (Z) is clear (0).
    ///
    /// This instruction is typically used after comparison or arithmetic operations
    /// to test if the result was not zero. Common use cases:
    /// - After CMP: Branch if values are not equal
    /// - Loop conditions: Continue loop while counter is not zero
    /// - Checking for non-zero values
    ///
    /// Flags affected: None
    ///
    /// Cycles:
    /// - 2 cycles if branch not taken
    /// - 3 cycles if branch taken
    /// - 4 cycles if branch taken and crosses page boundary
    ///
    /// # Arguments
    /// * `bus` - The memory bus (for reading the branch offset)
    /// * `addr_result` - The addressing result containing the branch target address
    ///
    /// # Returns
    /// The number of additional cycles used (0, 1, or 2)
    ///
    /// # Example
    /// ```text
    /// loop:
    ///     DEX         ; Decrement X
    ///     BNE loop    ; Continue loop while X != 0
    /// ```
    pub fn bne(&mut self, _bus: &Bus, addr_result: &AddressingResult) -> u8 {
        self.branch(!self.get_zero(), addr_result)
    }

    /// BMI - Branch if Minus (Negative Set)
    ///
    /// Branches if the Negative flag (N) is set (1).
    ///
    /// This instruction is typically used to test if a value is negative
    /// (bit 7 is set). Common use cases:
    /// - Testing sign of a value after load or arithmetic
    /// - After CMP: Testing relative magnitude with signed interpretation
    /// - Processing signed numbers
    ///
    /// Flags affected: None
    ///
    /// Cycles:
    /// - 2 cycles if branch not taken
    /// - 3 cycles if branch taken
    /// - 4 cycles if branch taken and crosses page boundary
    ///
    /// # Arguments
    /// * `bus` - The memory bus (for reading the branch offset)
    /// * `addr_result` - The addressing result containing the branch target address
    ///
    /// # Returns
    /// The number of additional cycles used (0, 1, or 2)
    ///
    /// # Example
    /// ```text
    /// LDA value   ; Load value
    /// BMI negative ; Branch if bit 7 is set (negative)
    /// ```
    pub fn bmi(&mut self, _bus: &Bus, addr_result: &AddressingResult) -> u8 {
        self.branch(self.get_negative(), addr_result)
    }

    /// BPL - Branch if Plus (Negative Clear)
    ///
    /// Branches if the Negative flag (N) is clear (0).
    ///
    /// This instruction is typically used to test if a value is positive
    /// (bit 7 is clear). Common use cases:
    /// - Testing sign of a value after load or arithmetic
    /// - After CMP: Testing relative magnitude with signed interpretation
    /// - Processing signed numbers
    ///
    /// Flags affected: None
    ///
    /// Cycles:
    /// - 2 cycles if branch not taken
    /// - 3 cycles if branch taken
    /// - 4 cycles if branch taken and crosses page boundary
    ///
    /// # Arguments
    /// * `bus` - The memory bus (for reading the branch offset)
    /// * `addr_result` - The addressing result containing the branch target address
    ///
    /// # Returns
    /// The number of additional cycles used (0, 1, or 2)
    ///
    /// # Example
    /// ```text
    /// LDA value   ; Load value
    /// BPL positive ; Branch if bit 7 is clear (positive)
    /// ```
    pub fn bpl(&mut self, _bus: &Bus, addr_result: &AddressingResult) -> u8 {
        self.branch(!self.get_negative(), addr_result)
    }

    /// BVC - Branch if Overflow Clear
    ///
    /// Branches if the Overflow flag (V) is clear (0).
    ///
    /// This instruction is typically used after arithmetic operations (ADC, SBC)
    /// to test if signed overflow did not occur. Common use cases:
    /// - Checking for valid results in signed arithmetic
    /// - After ADC/SBC: Branch if no signed overflow occurred
    /// - Validating signed arithmetic operations
    ///
    /// Flags affected: None
    ///
    /// Cycles:
    /// - 2 cycles if branch not taken
    /// - 3 cycles if branch taken
    /// - 4 cycles if branch taken and crosses page boundary
    ///
    /// # Arguments
    /// * `bus` - The memory bus (for reading the branch offset)
    /// * `addr_result` - The addressing result containing the branch target address
    ///
    /// # Returns
    /// The number of additional cycles used (0, 1, or 2)
    ///
    /// # Example
    /// ```text
    /// ADC #$10    ; Add with carry
    /// BVC no_overflow ; Branch if no signed overflow
    /// ```
    pub fn bvc(&mut self, _bus: &Bus, addr_result: &AddressingResult) -> u8 {
        self.branch(!self.get_overflow(), addr_result)
    }

    /// BVS - Branch if Overflow Set
    ///
    /// Branches if the Overflow flag (V) is set (1).
    ///
    /// This instruction is typically used after arithmetic operations (ADC, SBC)
    /// to test if signed overflow occurred. Common use cases:
    /// - Detecting invalid results in signed arithmetic
    /// - After ADC/SBC: Branch if signed overflow occurred
    /// - Error handling for signed arithmetic
    ///
    /// Flags affected: None
    ///
    /// Cycles:
    /// - 2 cycles if branch not taken
    /// - 3 cycles if branch taken
    /// - 4 cycles if branch taken and crosses page boundary
    ///
    /// # Arguments
    /// * `bus` - The memory bus (for reading the branch offset)
    /// * `addr_result` - The addressing result containing the branch target address
    ///
    /// # Returns
    /// The number of additional cycles used (0, 1, or 2)
    ///
    /// # Example
    /// ```text
    /// ADC #$70    ; Add with carry
    /// BVS overflow ; Branch if signed overflow occurred
    /// ```
    pub fn bvs(&mut self, _bus: &Bus, addr_result: &AddressingResult) -> u8 {
        self.branch(self.get_overflow(), addr_result)
    }

    // ========================================
    // Helper Methods
    // ========================================

    /// Internal branch helper method
    ///
    /// Performs the actual branch logic used by all branch instructions.
    /// If the condition is true, updates the program counter to the target address
    /// and returns the number of additional cycles used.
    ///
    /// Branch timing:
    /// - Base cost: 2 cycles (included in instruction execution, not returned here)
    /// - +1 cycle if branch is taken (returned as 1)
    /// - +1 cycle if branch crosses page boundary (returned as 2 total)
    ///
    /// # Arguments
    /// * `condition` - Whether to take the branch
    /// * `addr_result` - The addressing result containing the branch target and page cross info
    ///
    /// # Returns
    /// Additional cycles: 0 if not taken, 1 if taken, 2 if taken and crossed page
    #[inline]
    fn branch(&mut self, condition: bool, addr_result: &AddressingResult) -> u8 {
        if condition {
            // Branch is taken - update PC to target address
            self.pc = addr_result.address;

            // Add 1 cycle for taken branch, plus 1 more if page boundary crossed
            if addr_result.page_crossed {
                2
            } else {
                1
            }
        } else {
            // Branch not taken - no additional cycles
            0
        }
    }
}

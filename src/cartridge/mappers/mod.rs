// Mappers module - Implementations of various NES cartridge mappers
//
// This module contains the mapper factory and individual mapper implementations.
// Each mapper handles memory mapping and banking for different cartridge types.

mod mapper0;

use super::{Cartridge, Mapper};
use crate::error::CoreError;
use mapper0::Mapper0;

/// Create a mapper instance based on the mapper number in the cartridge
///
/// This factory function creates the appropriate mapper implementation for the
/// given cartridge. The mapper number is determined from the iNES header.
///
/// # Errors
/// Returns `CoreError::UnsupportedMapper` if the mapper number is not implemented
pub fn create_mapper(cartridge: Cartridge) -> Result<Box<dyn Mapper>, CoreError> {
    match cartridge.mapper {
        0 => Ok(Box::new(Mapper0::new(cartridge))),
        mapper_num => Err(CoreError::UnsupportedMapper(mapper_num)),
    }
}

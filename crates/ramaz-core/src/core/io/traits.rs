use crate::core::models::structure::Structure;
use crate::core::models::system::MolecularSystem;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading and writing molecular file formats.
///
/// Readers return every conformational state found in the file as a
/// [`Structure`]; writers always emit a single state.
pub trait MolecularFile {
    /// The type of metadata associated with the file format.
    type Metadata;

    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads all conformational states from a buffered reader.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    ///
    /// # Return
    ///
    /// Returns the parsed structure and associated metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(reader: &mut impl BufRead) -> Result<(Structure, Self::Metadata), Self::Error>;

    /// Writes a molecular system and metadata to a writer.
    ///
    /// # Arguments
    ///
    /// * `system` - The molecular system to write.
    /// * `metadata` - The metadata to include in the output.
    /// * `writer` - The writer to output to.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails or I/O operations encounter issues.
    fn write_to(
        system: &MolecularSystem,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error>;

    /// Writes a molecular system to a writer without metadata.
    ///
    /// # Arguments
    ///
    /// * `system` - The molecular system to write.
    /// * `writer` - The writer to output to.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails or I/O operations encounter issues.
    fn write_system_to(system: &MolecularSystem, writer: &mut impl Write)
    -> Result<(), Self::Error>;

    /// Reads all conformational states from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<(Structure, Self::Metadata), Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Writes a molecular system and metadata to a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(
        system: &MolecularSystem,
        metadata: &Self::Metadata,
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(system, metadata, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Writes a molecular system to a file path without metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_system_to_path<P: AsRef<Path>>(
        system: &MolecularSystem,
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_system_to(system, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// Writes a single molecular system to a file.
///
/// This is the object-safe counterpart of [`MolecularFile`] used by the
/// pipeline to emit partial models without knowing the concrete format.
pub trait ModelSerializer {
    /// File extension (without the dot) of the files this serializer writes.
    fn extension(&self) -> &'static str;

    /// Writes `system` to `path`, replacing any existing file.
    fn write_model(&self, system: &MolecularSystem, path: &Path) -> Result<(), io::Error>;
}

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use serde::{Serialize, Deserialize};
use crate::front::FrontRecord;




// ============================================================================
#[derive(thiserror::Error, Debug)]
pub enum Error {

    #[cfg(feature = "serde_cbor")]
    #[error("{0}")]
    SerdeCbor(#[from] serde_cbor::Error),

    #[error("{0}")]
    IO(#[from] std::io::Error),

    #[error("input file {0} given, but serde_cbor is not enabled")]
    SerdeCborNotEnabled(String),
}




/**
 * Append-only binary log of the ionisation front. Every record is three
 * little-endian f64 values, time, radius, and ionising rate, and is flushed
 * as soon as it is written.
 */
pub struct FrontLog<W: Write> {
    writer: W,
}




// ============================================================================
impl FrontLog<BufWriter<File>> {

    /**
     * Open the log file at the given path, appending to it if it exists so
     * that a restarted run continues the same log.
     */
    pub fn open(path_str: &str) -> Result<Self, Error> {
        let file = OpenOptions::new().create(true).append(true).open(path_str)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> FrontLog<W> {

    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn append(&mut self, record: &FrontRecord) -> Result<(), Error> {
        self.writer.write_all(&record.time.to_le_bytes())?;
        self.writer.write_all(&record.radius.to_le_bytes())?;
        self.writer.write_all(&record.ionising_rate.to_le_bytes())?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}




/**
 * Read back all the records of a front log.
 */
pub fn read_front_log<R: Read>(mut reader: R) -> Result<Vec<FrontRecord>, Error> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    let value = |chunk: &[u8]| {
        let mut word = [0; 8];
        word.copy_from_slice(chunk);
        f64::from_le_bytes(word)
    };

    Ok(bytes.chunks_exact(24).map(|record| FrontRecord {
        time: value(&record[0..8]),
        radius: value(&record[8..16]),
        ionising_rate: value(&record[16..24]),
    }).collect())
}




// ============================================================================
pub fn parent_directory(path_str: &str) -> String {
    match Path::new(&path_str).parent().and_then(Path::to_str) {
        None     => ".",
        Some("") => ".",
        Some(parent) => parent,
    }.into()
}

#[cfg(feature = "serde_cbor")]
pub fn write_cbor<T: Serialize>(value: &T, path_str: &str) -> Result<(), Error> {
    println!("write {}", path_str);
    let file = File::create(&path_str)?;
    let buffer = BufWriter::new(file);

    serde_cbor::to_writer(buffer, &value)?;
    Ok(())
}

#[cfg(not(feature = "serde_cbor"))]
pub fn write_cbor<T: Serialize>(_: &T, path_str: &str) -> Result<(), Error> {
    println!("skip writing {} (serde_cbor is not enabled)", path_str);
    Ok(())
}

#[cfg(feature = "serde_cbor")]
pub fn read_cbor<T: for<'de> Deserialize<'de>>(path_str: &str) -> Result<T, Error> {
    let file = File::open(path_str)?;
    let buffer = std::io::BufReader::new(file);
    Ok(serde_cbor::from_reader(buffer)?)
}

#[cfg(not(feature = "serde_cbor"))]
pub fn read_cbor<T: for<'de> Deserialize<'de>>(path_str: &str) -> Result<T, Error> {
    Err(Error::SerdeCborNotEnabled(path_str.to_string()))
}




// ============================================================================
#[cfg(test)]
mod test {
    use crate::front::FrontRecord;
    use super::*;

    #[test]
    fn front_records_are_little_endian_triples() {
        let mut log = FrontLog::new(Vec::new());
        log.append(&FrontRecord { time: 1.0, radius: 2.0, ionising_rate: 3.0 }).unwrap();
        log.append(&FrontRecord { time: 4.0, radius: 5.0, ionising_rate: 6.0 }).unwrap();

        let bytes = log.into_inner();
        assert_eq!(bytes.len(), 48);
        assert_eq!(&bytes[8..16], &2.0f64.to_le_bytes());

        let records = read_front_log(&bytes[..]).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1], FrontRecord { time: 4.0, radius: 5.0, ionising_rate: 6.0 });
    }

    #[test]
    fn reopened_log_is_appended_to() {
        let path = std::env::temp_dir().join(format!("ionfront-log-{}.dat", std::process::id()));
        let path_str = path.to_str().unwrap();
        let _ = std::fs::remove_file(&path);

        FrontLog::open(path_str).unwrap().append(&FrontRecord { time: 0.0, radius: 1.0, ionising_rate: 1.0 }).unwrap();
        FrontLog::open(path_str).unwrap().append(&FrontRecord { time: 1.0, radius: 2.0, ionising_rate: 1.0 }).unwrap();

        let records = read_front_log(File::open(&path).unwrap()).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].radius, 2.0);
    }

    #[test]
    fn parent_directory_defaults_to_cwd() {
        assert_eq!(parent_directory("setup.yaml"), ".");
        assert_eq!(parent_directory("runs/setup.yaml"), "runs");
    }
}

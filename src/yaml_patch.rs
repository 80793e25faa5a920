use std::io::Read;
use serde::{Serialize, Deserialize};
use serde_yaml::{Value, Mapping, to_value, from_value, from_str, from_reader};




// ============================================================================
#[derive(thiserror::Error, Debug)]
pub enum Error {

    #[error("{0}")]
    SerdeYaml(#[from] serde_yaml::Error),

    #[error("patch '{0}' is not of the form key.subkey=value")]
    BadKeyVal(String),
}




// ============================================================================
fn merge_mapping(value_map: &Mapping, patch_map: &Mapping) -> Mapping {
    let mut result = value_map.clone();

    for (key, patch_value) in patch_map {
        let new_value = merge_value(value_map.get(key).unwrap_or(&Value::Null), patch_value);
        result.insert(key.clone(), new_value);
    }
    result
}




// ============================================================================
fn merge_value(value: &Value, patch: &Value) -> Value {
    if let (Some(value_map), Some(patch_map)) = (value.as_mapping(), patch.as_mapping()) {
        Value::from(merge_mapping(value_map, patch_map))
    } else {
        patch.clone()
    }
}




/**
 * Turn a command line item like `radiation.mode=monte_carlo` into the nested
 * mapping `{radiation: {mode: monte_carlo}}`.
 */
fn value_from_key_val(key_val: &str) -> Result<Value, Error> {
    let (key, val) = match key_val.find('=') {
        Some(i) if i > 0 => (&key_val[..i], &key_val[i + 1..]),
        _ => return Err(Error::BadKeyVal(key_val.to_string())),
    };
    let leaf: Value = from_str(val)?;

    Ok(key.rsplit('.').fold(leaf, |inner, part| {
        let mut mapping = Mapping::new();
        mapping.insert(Value::from(part), inner);
        Value::from(mapping)
    }))
}




/**
 * Extends anything that is Clone, Serialize, and Deserialize to have mutable
 * "patch" methods, accepting `serde_yaml::Value` objects.
 */
pub trait Patch {
    fn patch_from_value(&mut self, patch_value: &Value) -> Result<(), Error>;
    fn patch_from_str(&mut self, yaml_str: &str) -> Result<(), Error> {
        self.patch_from_value(&from_str(yaml_str)?)
    }
    fn patch_from_reader<R>(&mut self, reader: R) -> Result<(), Error> where R: Read {
        self.patch_from_value(&from_reader(reader)?)
    }
    fn patch_from_key_val(&mut self, key_val: &str) -> Result<(), Error> {
        self.patch_from_value(&value_from_key_val(key_val)?)
    }
}




// ============================================================================
impl<T> Patch for T where T: Clone + Serialize + for<'de> Deserialize<'de> {
    fn patch_from_value(&mut self, patch_value: &Value) -> Result<(), Error> {
        let self_value = to_value(self.clone())?;
        let merged_self_value = merge_value(&self_value, patch_value);
        let merged_self: T = from_value(merged_self_value)?;
        *self = merged_self;
        Ok(())
    }
}




// ============================================================================
#[cfg(test)]
mod test {
    use super::Patch;

    #[derive(Clone, serde::Serialize, serde::Deserialize)]
    struct Inner {
        a: f64,
        b: String,
    }

    #[derive(Clone, serde::Serialize, serde::Deserialize)]
    struct Config {
        x: f64,
        y: usize,
        inner: Inner,
    }

    fn config() -> Config {
        Config { x: 32.0, y: 512, inner: Inner { a: 1.0, b: "jump".into() } }
    }

    #[test]
    fn can_merge() {
        let mut config = config();
        config.patch_from_str(r"y: 1024").unwrap();
        assert!(config.x == 32.0);
        assert!(config.y == 1024);
    }

    #[test]
    fn can_patch_nested_key_val() {
        let mut config = config();
        config.patch_from_key_val("inner.b=smooth").unwrap();
        config.patch_from_key_val("inner.a=2.5e3").unwrap();
        assert_eq!(config.inner.b, "smooth");
        assert_eq!(config.inner.a, 2500.0);
        assert_eq!(config.y, 512);
    }

    #[test]
    fn malformed_key_val_is_rejected() {
        assert!(config().patch_from_key_val("inner.a").is_err());
        assert!(config().patch_from_key_val("=3").is_err());
        assert!(config().patch_from_key_val("y=abc").is_err());
    }
}

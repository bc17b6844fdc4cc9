use std::fs;
use std::io::{self, Read};
use std::path::Path;

use super::schema::SchemaError;

pub fn load_schema_text(
    schema_path: Option<&Path>,
    schema_text: Option<&str>,
) -> Result<String, SchemaError> {
    if let Some(text) = schema_text {
        return Ok(text.to_owned());
    }

    let Some(path) = schema_path else {
        return Err(SchemaError::MissingInput);
    };
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| SchemaError::Io {
                path: "<stdin>".to_owned(),
                source,
            })?;
        return Ok(buf);
    }
    fs::read_to_string(path).map_err(|source| SchemaError::Io {
        path: path.display().to_string(),
        source,
    })
}

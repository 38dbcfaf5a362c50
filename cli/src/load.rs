//! Input adapters: CSV query pairs and the JSON user dataset.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use subpath_core::{Query, UserRecord};

use crate::error::{Error, Result};

/// Read `from,to` rows (no header) and number them in file order.
///
/// Every row must have exactly two fields. An input with no rows is an
/// error.
pub fn read_queries<R: Read>(reader: R, name: &str) -> Result<Vec<Query>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(reader);

    let mut pairs = Vec::new();
    for (row, record) in rdr.records().enumerate() {
        let record = record.map_err(|e| Error::unreadable(name, e))?;
        if record.len() != 2 {
            return Err(Error::unreadable(
                name,
                format!("row {} has {} field(s), expected 2", row + 1, record.len()),
            ));
        }
        pairs.push((record[0].to_string(), record[1].to_string()));
    }

    if pairs.is_empty() {
        return Err(Error::EmptyQuerySet(name.to_string()));
    }
    Ok(Query::numbered(pairs))
}

/// Read a top-level JSON array of user objects.
///
/// `null` and `[]` both count as an empty user set.
pub fn read_users<R: Read>(reader: R, name: &str) -> Result<Vec<UserRecord>> {
    let users: Option<Vec<UserRecord>> =
        serde_json::from_reader(BufReader::new(reader)).map_err(|e| Error::unreadable(name, e))?;

    match users {
        Some(users) if !users.is_empty() => Ok(users),
        _ => Err(Error::EmptyUserSet(name.to_string())),
    }
}

pub fn load_queries(path: &Path) -> Result<Vec<Query>> {
    let name = path.display().to_string();
    let file = File::open(path).map_err(|e| Error::unreadable(&name, e))?;
    read_queries(file, &name)
}

pub fn load_users(path: &Path) -> Result<Vec<UserRecord>> {
    let name = path.display().to_string();
    let file = File::open(path).map_err(|e| Error::unreadable(&name, e))?;
    read_users(file, &name)
}

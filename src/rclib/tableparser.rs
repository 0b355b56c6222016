use crate::rclib::LoadError;
use std::{
    fs::File,
    io::{self, BufRead},
    path::{Path, PathBuf},
};

type FileHandler = io::Result<io::Lines<io::BufReader<File>>>;

fn read_lines<P>(filename: P) -> FileHandler
where
    P: AsRef<Path>,
{
    let file = File::open(filename)?;
    Ok(io::BufReader::new(file).lines())
}

/// One row of the room table
#[derive(Debug, Clone, PartialEq)]
pub struct RoomEntry {
    pub room: String,
    pub acuity: f64,
    pub discharge: bool,
}

pub struct RoomTableParser {
    /* Read a delimited room table with a header row. Columns are found by name
    so extra columns and any column order are fine. */
    file: PathBuf,
}

struct Columns {
    room: usize,
    acuity: usize,
    discharge: usize,
    delim: char,
}

impl Columns {
    fn from_header(header: &str) -> Result<Self, LoadError> {
        // spreadsheet exports often lead with a byte order mark
        let header = header.trim_start_matches('\u{feff}');
        let delim = if !header.contains(',') && header.contains('\t') {
            '\t'
        } else {
            ','
        };
        let names: Vec<String> = split_fields(header, delim)
            .into_iter()
            .map(|x| clean_field(x).to_ascii_lowercase())
            .collect();
        let find = |name: &'static str| {
            names
                .iter()
                .position(|x| x == &name.to_ascii_lowercase())
                .ok_or(LoadError::MissingColumn(name))
        };
        Ok(Self {
            room: find("Room")?,
            acuity: find("Acuity")?,
            discharge: find("Discharge")?,
            delim,
        })
    }
}

/// Splits on `delim` except inside double quotes, so `"Smith, J"` stays one field
fn split_fields(line: &str, delim: char) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    for (pos, c) in line.char_indices() {
        if c == '"' {
            quoted = !quoted;
        } else if c == delim && !quoted {
            fields.push(&line[start..pos]);
            start = pos + c.len_utf8();
        }
    }
    fields.push(&line[start..]);
    fields
}

fn clean_field(field: &str) -> &str {
    field.trim().trim_matches('"').trim()
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "t" => Some(true),
        "false" | "0" | "no" | "n" | "f" => Some(false),
        _ => None,
    }
}

impl RoomTableParser {
    pub fn new(path: &Path) -> Self {
        Self {
            file: path.to_path_buf(),
        }
    }

    pub fn parse(&self) -> Result<Vec<RoomEntry>, LoadError> {
        let lines = read_lines(&self.file).map_err(|source| LoadError::Io {
            path: self.file.clone(),
            source,
        })?;
        let lines = lines
            .collect::<io::Result<Vec<String>>>()
            .map_err(|source| LoadError::Io {
                path: self.file.clone(),
                source,
            })?;
        let ret = self.parse_lines(lines.iter().map(String::as_str))?;
        debug!("loaded {} rooms from {:?}", ret.len(), self.file);
        Ok(ret)
    }

    fn parse_lines<'a, I>(&self, lines: I) -> Result<Vec<RoomEntry>, LoadError>
    where
        I: Iterator<Item = &'a str>,
    {
        // 1-based line numbers, blank lines skipped
        let mut lines = lines
            .enumerate()
            .map(|(i, line)| (i + 1, line))
            .filter(|(_, line)| !line.trim().is_empty());

        let (_, header) = lines
            .next()
            .ok_or_else(|| LoadError::EmptyFile(self.file.clone()))?;
        let cols = Columns::from_header(header)?;

        let entries = lines
            .map(|(lineno, line)| {
                let collection: Vec<&str> = split_fields(line, cols.delim)
                    .into_iter()
                    .map(clean_field)
                    .collect();
                let field = |idx: usize, name: &str| {
                    collection
                        .get(idx)
                        .copied()
                        .ok_or_else(|| LoadError::MalformedLine {
                            line: lineno,
                            reason: format!("missing {} field", name),
                        })
                };

                let room = field(cols.room, "Room")?;
                if room.is_empty() {
                    return Err(LoadError::MalformedLine {
                        line: lineno,
                        reason: "empty Room field".to_string(),
                    });
                }

                let acuity_str = field(cols.acuity, "Acuity")?;
                let acuity = acuity_str
                    .parse::<f64>()
                    .ok()
                    .filter(|x| x.is_finite() && *x >= 0.0)
                    .ok_or_else(|| LoadError::MalformedLine {
                        line: lineno,
                        reason: format!("Acuity '{}' is not a non-negative number", acuity_str),
                    })?;

                let discharge_str = field(cols.discharge, "Discharge")?;
                let discharge =
                    parse_flag(discharge_str).ok_or_else(|| LoadError::MalformedLine {
                        line: lineno,
                        reason: format!("Discharge '{}' is not a boolean", discharge_str),
                    })?;

                Ok(RoomEntry {
                    room: room.to_string(),
                    acuity,
                    discharge,
                })
            })
            .collect::<Result<Vec<RoomEntry>, LoadError>>()?;

        // header only
        if entries.is_empty() {
            return Err(LoadError::EmptyFile(self.file.clone()));
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    fn parse(text: &str) -> Result<Vec<RoomEntry>, LoadError> {
        RoomTableParser::new(Path::new("rooms.csv")).parse_lines(text.lines())
    }

    #[test]
    fn reads_rows() {
        let ret = parse("Room,Nurse,Acuity,Discharge\n101,ann,2.5,True\n\n102,bob,1,false\n").unwrap();
        assert_eq!(
            ret,
            vec![
                RoomEntry {
                    room: "101".to_string(),
                    acuity: 2.5,
                    discharge: true
                },
                RoomEntry {
                    room: "102".to_string(),
                    acuity: 1.0,
                    discharge: false
                },
            ]
        );
    }

    #[test]
    fn tabs_and_case() {
        let ret = parse("discharge\tROOM\tacuity\nyes\t\"7B\"\t3\n").unwrap();
        assert_eq!(ret[0].room, "7B");
        assert_eq!(ret[0].acuity, 3.0);
        assert!(ret[0].discharge);

        let ret = parse("\u{feff}Room,Acuity,Discharge\n101,1,True\n").unwrap();
        assert_eq!(ret[0].room, "101");
        assert!(ret[0].discharge);
    }

    #[test]
    fn quoted_delimiters() {
        let ret = parse("Room,Nurse,Acuity,Discharge\n101,\"Smith, J\",2,false\n").unwrap();
        assert_eq!(ret[0].room, "101");
        assert_eq!(ret[0].acuity, 2.0);
        assert!(!ret[0].discharge);
        assert_eq!(split_fields("a,\"b,c\",d", ','), vec!["a", "\"b,c\"", "d"]);
    }

    #[test]
    fn header_problems() {
        assert!(matches!(parse(""), Err(LoadError::EmptyFile(_))));
        assert!(matches!(
            parse("Room,Acuity,Discharge\n\n"),
            Err(LoadError::EmptyFile(_))
        ));
        assert!(matches!(
            parse("Room,Acuity\n101,2\n"),
            Err(LoadError::MissingColumn("Discharge"))
        ));
    }

    #[test]
    fn bad_rows() {
        assert!(matches!(
            parse("Room,Acuity,Discharge\n101,high,true\n"),
            Err(LoadError::MalformedLine { line: 2, .. })
        ));
        assert!(matches!(
            parse("Room,Acuity,Discharge\n101,-1,true\n"),
            Err(LoadError::MalformedLine { line: 2, .. })
        ));
        assert!(matches!(
            parse("Room,Acuity,Discharge\n101,1,maybe\n"),
            Err(LoadError::MalformedLine { line: 2, .. })
        ));
        assert!(matches!(
            parse("Room,Acuity,Discharge\n\n101,1\n"),
            Err(LoadError::MalformedLine { line: 3, .. })
        ));
    }

    #[test]
    fn from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Room,Acuity,Discharge").unwrap();
        writeln!(file, "201,4,False").unwrap();
        let ret = RoomTableParser::new(file.path()).parse().unwrap();
        assert_eq!(ret.len(), 1);
        assert_eq!(ret[0].acuity, 4.0);

        let missing = RoomTableParser::new(Path::new("/nonexistent/rooms.csv")).parse();
        assert!(matches!(missing, Err(LoadError::Io { .. })));
    }
}

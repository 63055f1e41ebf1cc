/*
A record is one of:
    5	AUE_NULL	STD	{ long linux_setxattr(const char *path, const char *name, const void *value, size_t size, int flags); }
    23	AUE_DUP	NOPROTO	{ long dup(unsigned int fildes); }
    39	AUE_NULL	UNIMPL	linux_umount2
    244-259	AUE_NULL	UNIMPL	unimpl_md_syscall
Ranges are only allowed for placeholders and cover at most MAX_RANGE numbers.
A declaration may span multiple lines until its closing brace.
Lines ending in a backslash are joined with the next line.
Lines starting with ';' are comments, '#include' lines are skipped.
*/

use std::{
    fmt,
    path::Path,
};

use thiserror::Error;

/// Linux passes at most this many arguments in registers
pub const MAX_ARGS: usize = 6;

/// Upper bound on the numbers a single range record may cover
pub const MAX_RANGE: u64 = 4096;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: expected {what}")]
    Expected { line: usize, what: &'static str },

    #[error("line {line}: invalid system call number '{text}'")]
    InvalidNumber { line: usize, text: String },

    #[error("line {line}: invalid range {first}-{last}")]
    InvalidRange { line: usize, first: u64, last: u64 },

    #[error("line {line}: {kind} records cannot cover a range of numbers")]
    RangeNotAllowed { line: usize, kind: SlotKind },

    #[error("line {line}: unknown record type '{text}'")]
    UnknownType { line: usize, text: String },

    #[error("line {line}: unsupported directive '#{text}'")]
    UnsupportedDirective { line: usize, text: String },

    #[error("line {line}: declaration is missing its closing brace")]
    UnterminatedDeclaration { line: usize },

    #[error("line {line}: malformed declaration: {reason}")]
    MalformedDeclaration { line: usize, reason: String },

    #[error("line {line}: {kind} records need a declaration in braces")]
    MissingDeclaration { line: usize, kind: SlotKind },

    #[error("line {line}: {count} arguments exceed the limit of {}", MAX_ARGS)]
    TooManyArgs { line: usize, count: usize },

    #[error("IO error: {0}")]
    IOError(String),
}

/// What a slot in the table is used for
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SlotKind {
    /// Implemented by the emulation layer
    Std,
    /// Implemented by a native handler that shares its prototype
    NoProto,
    /// Implemented, takes no arguments
    NoArgs,
    /// Not implemented
    Unimplemented,
    /// Obsolete, kept so the number is never reused
    Obsolete,
    /// Reserved for future use
    Reserved,
}

impl SlotKind {
    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "STD" => Some(SlotKind::Std),
            "NOPROTO" => Some(SlotKind::NoProto),
            "NOARGS" => Some(SlotKind::NoArgs),
            "UNIMPL" => Some(SlotKind::Unimplemented),
            "OBSOL" => Some(SlotKind::Obsolete),
            "RESERVED" => Some(SlotKind::Reserved),
            _ => None,
        }
    }

    /// The keyword of this kind in the master file
    pub fn keyword(&self) -> &'static str {
        match self {
            SlotKind::Std => "STD",
            SlotKind::NoProto => "NOPROTO",
            SlotKind::NoArgs => "NOARGS",
            SlotKind::Unimplemented => "UNIMPL",
            SlotKind::Obsolete => "OBSOL",
            SlotKind::Reserved => "RESERVED",
        }
    }

    /// Whether a slot of this kind is a valid dispatch target
    pub fn is_bound(&self) -> bool {
        matches!(self, SlotKind::Std | SlotKind::NoProto | SlotKind::NoArgs)
    }

    /// The Rust path of this variant, as used in generated code
    pub fn variant(&self) -> &'static str {
        match self {
            SlotKind::Std => "SlotKind::Std",
            SlotKind::NoProto => "SlotKind::NoProto",
            SlotKind::NoArgs => "SlotKind::NoArgs",
            SlotKind::Unimplemented => "SlotKind::Unimplemented",
            SlotKind::Obsolete => "SlotKind::Obsolete",
            SlotKind::Reserved => "SlotKind::Reserved",
        }
    }
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg {
    ty: String,
    name: String,
}

impl Arg {
    pub fn ty(&self) -> &str {
        &self.ty
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ty.ends_with('*') {
            write!(f, "{}{}", self.ty, self.name)
        } else {
            write!(f, "{} {}", self.ty, self.name)
        }
    }
}

/// A C prototype like `long linux_write(unsigned int fd, const char *buf, size_t count)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    ret: String,
    name: String,
    args: Vec<Arg>,
}

impl Declaration {
    pub fn ret(&self) -> &str {
        &self.ret
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}(", self.ret, self.name)?;

        if self.args.is_empty() {
            f.write_str("void")?;
        }

        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", arg)?;
        }

        f.write_str(");")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordBody {
    Declaration(Declaration),
    Placeholder(String),
}

/// One record of the master file. Placeholder records may cover a range of numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    line: usize,
    first: u64,
    last: u64,
    audit: String,
    kind: SlotKind,
    body: RecordBody,
}

impl Record {
    /// The 1-based line number the record starts on
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn first(&self) -> u64 {
        self.first
    }

    pub fn last(&self) -> u64 {
        self.last
    }

    pub fn audit(&self) -> &str {
        &self.audit
    }

    pub fn kind(&self) -> SlotKind {
        self.kind
    }

    pub fn body(&self) -> &RecordBody {
        &self.body
    }

    pub fn name(&self) -> &str {
        match &self.body {
            RecordBody::Declaration(decl) => decl.name(),
            RecordBody::Placeholder(name) => name,
        }
    }

    pub fn declaration(&self) -> Option<&Declaration> {
        match &self.body {
            RecordBody::Declaration(decl) => Some(decl),
            RecordBody::Placeholder(_) => None,
        }
    }
}

fn is_ident(s: &str) -> bool {
    let mut chars = s.chars();

    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {},
        _ => return false,
    }

    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

fn parse_number(line: usize, text: &str) -> Result<u64, ParseError> {
    text.parse::<u64>().map_err(|_| ParseError::InvalidNumber {
        line,
        text: text.to_string(),
    })
}

fn parse_arg(line: usize, text: &str) -> Result<Arg, ParseError> {
    let split = text.rfind(|c: char| !(c == '_' || c.is_ascii_alphanumeric())).map(|x| x + 1).unwrap_or(0);
    let ty = text[..split].trim_end();
    let name = &text[split..];

    if ty.is_empty() || !is_ident(name) {
        return Err(ParseError::MalformedDeclaration {
            line,
            reason: format!("argument '{}' needs a type and a name", text),
        });
    }

    Ok(Arg {
        ty: ty.to_string(),
        name: name.to_string(),
    })
}

fn parse_declaration(line: usize, text: &str) -> Result<Declaration, ParseError> {
    let malformed = |reason: &str| ParseError::MalformedDeclaration {
        line,
        reason: reason.to_string(),
    };

    let text = text.trim();
    let text = text.strip_suffix(';').ok_or_else(|| malformed("missing ';' after the prototype"))?.trim_end();
    let open = text.find('(').ok_or_else(|| malformed("missing '('"))?;
    let inner = text[open + 1..].strip_suffix(')').ok_or_else(|| malformed("missing ')' at the end of the prototype"))?;

    /* Split "long *name" into return type and name */
    let head = text[..open].trim_end();
    let split = head.rfind(|c: char| c.is_whitespace() || c == '*').ok_or_else(|| malformed("missing return type"))?;
    let ret = head[..split + 1].trim();
    let name = &head[split + 1..];

    if ret.is_empty() || !is_ident(name) {
        return Err(malformed("expected '<return type> <name>(...)'"));
    }

    let inner = inner.trim();
    let mut args = Vec::new();

    if !inner.is_empty() && inner != "void" {
        for arg in inner.split(',') {
            args.push(parse_arg(line, arg.trim())?);
        }
    }

    if args.len() > MAX_ARGS {
        return Err(ParseError::TooManyArgs {
            line,
            count: args.len(),
        });
    }

    Ok(Declaration {
        ret: ret.to_string(),
        name: name.to_string(),
        args,
    })
}

struct MasterParser<'a> {
    lines: Vec<&'a str>,
    cursor: usize,
}

impl<'a> MasterParser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().collect(),
            cursor: 0,
        }
    }

    /// Collect the logical record that starts at `first`, following continuations and braces
    fn collect_record(&mut self, first: &str, line: usize) -> Result<String, ParseError> {
        let mut text = first.trim_end().to_string();

        loop {
            if let Some(stripped) = text.strip_suffix('\\') {
                text = stripped.to_string();
            } else if !(text.contains('{') && !text.contains('}')) {
                break;
            }

            match self.lines.get(self.cursor) {
                Some(next) => {
                    self.cursor += 1;
                    text.push(' ');
                    text.push_str(next.trim());
                },
                None => {
                    if text.contains('{') && !text.contains('}') {
                        return Err(ParseError::UnterminatedDeclaration {
                            line,
                        });
                    }
                    break;
                },
            }
        }

        Ok(text)
    }

    fn next_record(&mut self) -> Result<Option<Record>, ParseError> {
        while self.cursor < self.lines.len() {
            let line = self.cursor + 1;
            let raw = self.lines[self.cursor];
            self.cursor += 1;

            let trimmed = raw.trim();

            if trimmed.is_empty() || trimmed.starts_with(';') {
                continue;
            }

            if let Some(directive) = trimmed.strip_prefix('#') {
                let directive = directive.trim_start();

                if directive.starts_with("include") {
                    continue;
                }

                return Err(ParseError::UnsupportedDirective {
                    line,
                    text: directive.to_string(),
                });
            }

            let text = self.collect_record(trimmed, line)?;
            return parse_record(line, &text).map(Some);
        }

        Ok(None)
    }
}

fn parse_record(line: usize, text: &str) -> Result<Record, ParseError> {
    let (head, body) = match text.find('{') {
        Some(open) => {
            let close = text.rfind('}').ok_or(ParseError::UnterminatedDeclaration {
                line,
            })?;

            if close < open {
                return Err(ParseError::UnterminatedDeclaration {
                    line,
                });
            }

            if !text[close + 1..].trim().is_empty() {
                return Err(ParseError::Expected {
                    line,
                    what: "end of record after '}'",
                });
            }

            (&text[..open], Some(&text[open + 1..close]))
        },
        None => (text, None),
    };

    let mut fields = head.split_whitespace();
    let number = fields.next().ok_or(ParseError::Expected {
        line,
        what: "system call number",
    })?;
    let audit = fields.next().ok_or(ParseError::Expected {
        line,
        what: "audit event",
    })?;
    let keyword = fields.next().ok_or(ParseError::Expected {
        line,
        what: "record type",
    })?;
    let kind = SlotKind::from_keyword(keyword).ok_or_else(|| ParseError::UnknownType {
        line,
        text: keyword.to_string(),
    })?;

    let (first, last) = match number.split_once('-') {
        Some((first, last)) => {
            let first = parse_number(line, first)?;
            let last = parse_number(line, last)?;

            if last < first || last - first >= MAX_RANGE {
                return Err(ParseError::InvalidRange {
                    line,
                    first,
                    last,
                });
            }

            (first, last)
        },
        None => {
            let number = parse_number(line, number)?;
            (number, number)
        },
    };

    if first != last && kind.is_bound() {
        return Err(ParseError::RangeNotAllowed {
            line,
            kind,
        });
    }

    let body = match body {
        Some(body) => {
            if fields.next().is_some() {
                return Err(ParseError::Expected {
                    line,
                    what: "'{' after the record type",
                });
            }

            let decl = parse_declaration(line, body)?;

            if kind == SlotKind::NoArgs && !decl.args.is_empty() {
                return Err(ParseError::MalformedDeclaration {
                    line,
                    reason: format!("{} records take no arguments", kind),
                });
            }

            if kind.is_bound() {
                RecordBody::Declaration(decl)
            } else {
                RecordBody::Placeholder(decl.name)
            }
        },
        None => {
            if kind.is_bound() {
                return Err(ParseError::MissingDeclaration {
                    line,
                    kind,
                });
            }

            let name = fields.next().ok_or(ParseError::Expected {
                line,
                what: "placeholder name",
            })?;

            if !is_ident(name) || fields.next().is_some() {
                return Err(ParseError::Expected {
                    line,
                    what: "a single identifier as placeholder name",
                });
            }

            RecordBody::Placeholder(name.to_string())
        },
    };

    Ok(Record {
        line,
        first,
        last,
        audit: audit.to_string(),
        kind,
        body,
    })
}

/// The parsed contents of a syscalls.master file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Master {
    records: Vec<Record>,
}

impl Master {
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut parser = MasterParser::new(text);
        let mut records = Vec::new();

        while let Some(record) = parser.next_record()? {
            records.push(record);
        }

        Ok(Self {
            records,
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParseError> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ParseError::IOError(format!("{}: {}", path.as_ref().display(), e)))?;
        Self::parse(&text)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }
}

//! The state handlers and the driver that feeds them one byte at a time.

use super::State;
use crate::character_sets::is_url_code_point;
use crate::checkers::{
    is_double_dot_segment, is_single_dot_segment, is_windows_drive_letter, parse_port,
};
use crate::compat::{Cow, String, Vec};
use crate::error::{ParseError, Result};
use crate::helpers::{ascii_string, sanitize};
use crate::host::{parse_host, Host};
use crate::scheme;
use crate::unicode::percent_encode::{
    is_pct_encoded, pct_encode_byte_into, pct_encode_byte_to_buffer, C0_CONTROL, FRAGMENT, PATH,
    QUERY, USERINFO,
};
use crate::url_record::UrlRecord;

/// What the driver does after a state handler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseAction {
    /// Consume the current byte.
    Increment,
    /// Reprocess the current byte (or a rewound position) in the new state.
    Continue,
    /// Stop and hand back the record (override mode).
    Success,
}

/// If `path` can lose a segment, pop one. A lone Windows drive letter on a
/// file URL is pinned.
fn shorten_path(scheme: &str, path: &mut Vec<String>) {
    if path.is_empty() {
        return;
    }
    if scheme == "file" && path.len() == 1 && is_windows_drive_letter(path[0].as_bytes()) {
        return;
    }
    path.pop();
}

/// One parse call's working set: the sanitized input, the cursor, the shared
/// lexeme buffer, the three authority flags, and the record under
/// construction. The base record is read-only.
pub(crate) struct ParserContext<'a> {
    input: Cow<'a, [u8]>,
    cursor: usize,
    state: State,
    state_override: Option<State>,
    buffer: Vec<u8>,
    at_flag: bool,
    square_braces_flag: bool,
    password_token_seen_flag: bool,
    url: UrlRecord,
    base: Option<&'a UrlRecord>,
}

impl<'a> ParserContext<'a> {
    pub(crate) fn new(
        input: &'a str,
        base: Option<&'a UrlRecord>,
        url: Option<UrlRecord>,
        state_override: Option<State>,
    ) -> Self {
        let (input, flagged) = sanitize(input.as_bytes());
        let mut url = url.unwrap_or_default();
        url.validation_error |= flagged;

        ParserContext {
            input,
            cursor: 0,
            state: state_override.unwrap_or(State::SchemeStart),
            state_override,
            buffer: Vec::new(),
            at_flag: false,
            square_braces_flag: false,
            password_token_seen_flag: false,
            url,
            base,
        }
    }

    /// Run the machine to completion. Each step sees the byte under the
    /// cursor, or the EOF sentinel once past the last one.
    pub(crate) fn run(mut self) -> Result<UrlRecord> {
        loop {
            let byte = self.current();
            match self.step(byte)? {
                ParseAction::Success => return Ok(self.url),
                ParseAction::Continue => {}
                ParseAction::Increment => {
                    if self.is_eof() {
                        break;
                    }
                    self.cursor += 1;
                }
            }
        }
        Ok(self.url)
    }

    fn step(&mut self, byte: Option<u8>) -> Result<ParseAction> {
        match self.state {
            State::SchemeStart => self.on_scheme_start(byte),
            State::Scheme => self.on_scheme(byte),
            State::NoScheme => self.on_no_scheme(byte),
            State::SpecialRelativeOrAuthority => self.on_special_relative_or_authority(byte),
            State::PathOrAuthority => self.on_path_or_authority(byte),
            State::Relative => self.on_relative(byte),
            State::RelativeSlash => self.on_relative_slash(byte),
            State::SpecialAuthoritySlashes => self.on_special_authority_slashes(byte),
            State::SpecialAuthorityIgnoreSlashes => {
                self.on_special_authority_ignore_slashes(byte)
            }
            State::Authority => self.on_authority(byte),
            State::Host | State::Hostname => self.on_hostname(byte),
            State::Port => self.on_port(byte),
            State::File => self.on_file(byte),
            State::FileSlash => self.on_file_slash(byte),
            State::FileHost => self.on_file_host(byte),
            State::PathStart => self.on_path_start(byte),
            State::Path => self.on_path(byte),
            State::CannotBeABaseUrlPath => self.on_cannot_be_a_base_url_path(byte),
            State::Query => self.on_query(byte),
            State::Fragment => self.on_fragment(byte),
        }
    }

    fn current(&self) -> Option<u8> {
        self.input.get(self.cursor).copied()
    }

    fn is_eof(&self) -> bool {
        self.cursor >= self.input.len()
    }

    /// Lookahead past the current byte.
    fn remaining_starts_with(&self, prefix: &[u8]) -> bool {
        self.input
            .get(self.cursor + 1..)
            .map_or(false, |rest| rest.starts_with(prefix))
    }

    /// The unconsumed input, current byte included.
    fn lookahead(&self) -> &[u8] {
        &self.input[self.cursor..]
    }

    fn reset(&mut self) {
        self.cursor = 0;
    }

    fn base(&self) -> Result<&'a UrlRecord> {
        self.base.ok_or(ParseError::InvalidSyntax)
    }

    /// EOF, `/`, `?`, `#`, or `\` on a special URL.
    fn is_authority_terminator(&self, byte: Option<u8>) -> bool {
        match byte {
            None | Some(b'/') | Some(b'?') | Some(b'#') => true,
            Some(b'\\') => self.url.is_special(),
            _ => false,
        }
    }

    fn inherit_authority(&mut self, base: &UrlRecord) {
        self.url.username = base.username.clone();
        self.url.password = base.password.clone();
        self.url.host = base.host.clone();
        self.url.port = base.port;
    }

    fn on_scheme_start(&mut self, byte: Option<u8>) -> Result<ParseAction> {
        match byte {
            Some(b) if b.is_ascii_alphabetic() => {
                self.buffer.push(b.to_ascii_lowercase());
                self.state = State::Scheme;
                Ok(ParseAction::Increment)
            }
            _ if self.state_override.is_none() => {
                self.state = State::NoScheme;
                self.reset();
                Ok(ParseAction::Continue)
            }
            _ => {
                self.url.validation_error = true;
                Err(ParseError::InvalidScheme)
            }
        }
    }

    fn on_scheme(&mut self, byte: Option<u8>) -> Result<ParseAction> {
        match byte {
            Some(b) if b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.') => {
                self.buffer.push(b.to_ascii_lowercase());
                Ok(ParseAction::Increment)
            }
            Some(b':') => self.commit_scheme(),
            _ if self.state_override.is_none() => {
                self.buffer.clear();
                self.state = State::NoScheme;
                self.reset();
                Ok(ParseAction::Continue)
            }
            _ => Err(ParseError::InvalidScheme),
        }
    }

    fn commit_scheme(&mut self) -> Result<ParseAction> {
        let candidate = ascii_string(&self.buffer);

        if self.state_override.is_some() {
            // a scheme change may not cross the special/non-special line,
            // give file a port or credentials, or strand a file host
            if self.url.is_special() != scheme::is_special(&candidate) {
                return Err(ParseError::InvalidScheme);
            }
            if (self.url.includes_credentials() || self.url.port.is_some()) && candidate == "file"
            {
                return Err(ParseError::InvalidScheme);
            }
            if self.url.scheme == "file" && self.url.host.as_ref().map_or(true, Host::is_empty) {
                return Err(ParseError::InvalidScheme);
            }
        }

        self.url.scheme = candidate;
        self.buffer.clear();

        if self.state_override.is_some() {
            if self.url.port == scheme::default_port(&self.url.scheme) {
                self.url.port = None;
            }
            return Ok(ParseAction::Success);
        }

        if self.url.scheme == "file" {
            if !self.remaining_starts_with(b"//") {
                self.url.validation_error = true;
            }
            self.state = State::File;
        } else if self.url.is_special()
            && self.base.map_or(false, |base| base.scheme == self.url.scheme)
        {
            self.state = State::SpecialRelativeOrAuthority;
        } else if self.url.is_special() {
            self.state = State::SpecialAuthoritySlashes;
        } else if self.remaining_starts_with(b"/") {
            self.state = State::PathOrAuthority;
            self.cursor += 1;
        } else {
            self.url.cannot_be_a_base_url = true;
            self.url.path.push(String::new());
            self.state = State::CannotBeABaseUrlPath;
        }
        Ok(ParseAction::Increment)
    }

    fn on_no_scheme(&mut self, byte: Option<u8>) -> Result<ParseAction> {
        let Some(base) = self.base else {
            self.url.validation_error = true;
            return Err(ParseError::InvalidSyntax);
        };

        if base.cannot_be_a_base_url {
            if byte != Some(b'#') {
                self.url.validation_error = true;
                return Err(ParseError::InvalidSyntax);
            }
            self.url.scheme = base.scheme.clone();
            self.url.path = base.path.clone();
            self.url.query = base.query.clone();
            self.url.fragment = Some(String::new());
            self.url.cannot_be_a_base_url = true;
            self.state = State::Fragment;
            Ok(ParseAction::Increment)
        } else if base.scheme != "file" {
            self.state = State::Relative;
            self.reset();
            Ok(ParseAction::Continue)
        } else {
            self.state = State::File;
            self.reset();
            Ok(ParseAction::Continue)
        }
    }

    fn on_special_relative_or_authority(&mut self, byte: Option<u8>) -> Result<ParseAction> {
        if byte == Some(b'/') && self.remaining_starts_with(b"/") {
            self.cursor += 1;
            self.state = State::SpecialAuthorityIgnoreSlashes;
            Ok(ParseAction::Increment)
        } else {
            self.url.validation_error = true;
            self.state = State::Relative;
            Ok(ParseAction::Continue)
        }
    }

    fn on_path_or_authority(&mut self, byte: Option<u8>) -> Result<ParseAction> {
        if byte == Some(b'/') {
            self.state = State::Authority;
            Ok(ParseAction::Increment)
        } else {
            self.state = State::Path;
            Ok(ParseAction::Continue)
        }
    }

    fn on_relative(&mut self, byte: Option<u8>) -> Result<ParseAction> {
        let base = self.base()?;
        self.url.scheme = base.scheme.clone();

        match byte {
            None => {
                self.inherit_authority(base);
                self.url.path = base.path.clone();
                self.url.query = base.query.clone();
                Ok(ParseAction::Increment)
            }
            Some(b'/') => {
                self.state = State::RelativeSlash;
                Ok(ParseAction::Increment)
            }
            Some(b'?') => {
                self.inherit_authority(base);
                self.url.path = base.path.clone();
                self.url.query = Some(String::new());
                self.state = State::Query;
                Ok(ParseAction::Increment)
            }
            Some(b'#') => {
                self.inherit_authority(base);
                self.url.path = base.path.clone();
                self.url.query = base.query.clone();
                self.url.fragment = Some(String::new());
                self.state = State::Fragment;
                Ok(ParseAction::Increment)
            }
            Some(b'\\') if self.url.is_special() => {
                self.url.validation_error = true;
                self.state = State::RelativeSlash;
                Ok(ParseAction::Increment)
            }
            Some(_) => {
                self.inherit_authority(base);
                self.url.path = base.path.clone();
                self.url.path.pop();
                self.state = State::Path;
                Ok(ParseAction::Continue)
            }
        }
    }

    fn on_relative_slash(&mut self, byte: Option<u8>) -> Result<ParseAction> {
        let base = self.base()?;

        if self.url.is_special() && matches!(byte, Some(b'/') | Some(b'\\')) {
            if byte == Some(b'\\') {
                self.url.validation_error = true;
            }
            self.state = State::SpecialAuthorityIgnoreSlashes;
            Ok(ParseAction::Increment)
        } else if byte == Some(b'/') {
            self.state = State::Authority;
            Ok(ParseAction::Increment)
        } else {
            self.inherit_authority(base);
            self.state = State::Path;
            Ok(ParseAction::Continue)
        }
    }

    fn on_special_authority_slashes(&mut self, byte: Option<u8>) -> Result<ParseAction> {
        if byte == Some(b'/') && self.remaining_starts_with(b"/") {
            self.cursor += 1;
            self.state = State::SpecialAuthorityIgnoreSlashes;
            Ok(ParseAction::Increment)
        } else {
            self.url.validation_error = true;
            self.state = State::SpecialAuthorityIgnoreSlashes;
            Ok(ParseAction::Continue)
        }
    }

    fn on_special_authority_ignore_slashes(&mut self, byte: Option<u8>) -> Result<ParseAction> {
        if matches!(byte, Some(b'/') | Some(b'\\')) {
            self.url.validation_error = true;
            Ok(ParseAction::Increment)
        } else {
            self.state = State::Authority;
            Ok(ParseAction::Continue)
        }
    }

    fn on_authority(&mut self, byte: Option<u8>) -> Result<ParseAction> {
        match byte {
            Some(b'@') => {
                self.url.validation_error = true;
                if self.at_flag {
                    // a second `@`: everything so far was really userinfo
                    let mut prefixed = Vec::with_capacity(self.buffer.len() + 3);
                    prefixed.extend_from_slice(b"%40");
                    prefixed.extend_from_slice(&self.buffer);
                    self.buffer = prefixed;
                }
                self.at_flag = true;

                let userinfo = core::mem::take(&mut self.buffer);
                for &b in &userinfo {
                    if b == b':' && !self.password_token_seen_flag {
                        self.password_token_seen_flag = true;
                        continue;
                    }
                    let target = if self.password_token_seen_flag {
                        &mut self.url.password
                    } else {
                        &mut self.url.username
                    };
                    pct_encode_byte_into(target, b, USERINFO);
                }
                Ok(ParseAction::Increment)
            }
            byte if self.is_authority_terminator(byte) => {
                if self.at_flag && self.buffer.is_empty() {
                    self.url.validation_error = true;
                    return Err(ParseError::InvalidUserInfo);
                }
                // hand the accumulated bytes back to the host state
                self.cursor -= self.buffer.len();
                self.buffer.clear();
                self.state = State::Host;
                Ok(ParseAction::Continue)
            }
            Some(b) => {
                self.buffer.push(b);
                Ok(ParseAction::Increment)
            }
            None => Ok(ParseAction::Increment),
        }
    }

    fn on_hostname(&mut self, byte: Option<u8>) -> Result<ParseAction> {
        if self.state_override.is_some() && self.url.scheme == "file" {
            self.state = State::FileHost;
            return Ok(ParseAction::Continue);
        }

        if byte == Some(b':') && !self.square_braces_flag {
            if self.buffer.is_empty() {
                self.url.validation_error = true;
                return Err(ParseError::InvalidHost);
            }
            let host = parse_host(
                &self.buffer,
                !self.url.is_special(),
                &mut self.url.validation_error,
            )?;
            self.url.host = Some(host);
            self.buffer.clear();
            self.state = State::Port;
            if self.state_override == Some(State::Hostname) {
                return Ok(ParseAction::Success);
            }
            Ok(ParseAction::Increment)
        } else if self.is_authority_terminator(byte) {
            if self.url.is_special() && self.buffer.is_empty() {
                self.url.validation_error = true;
                return Err(ParseError::InvalidHost);
            }
            let host = parse_host(
                &self.buffer,
                !self.url.is_special(),
                &mut self.url.validation_error,
            )?;
            self.url.host = Some(host);
            self.buffer.clear();
            self.state = State::PathStart;
            if self.state_override.is_some() {
                return Ok(ParseAction::Success);
            }
            Ok(ParseAction::Continue)
        } else if let Some(b) = byte {
            if b == b'[' {
                self.square_braces_flag = true;
            }
            if b == b']' {
                self.square_braces_flag = false;
            }
            self.buffer.push(b);
            Ok(ParseAction::Increment)
        } else {
            Ok(ParseAction::Increment)
        }
    }

    fn on_port(&mut self, byte: Option<u8>) -> Result<ParseAction> {
        if let Some(b) = byte {
            if b.is_ascii_digit() {
                self.buffer.push(b);
                return Ok(ParseAction::Increment);
            }
        }

        if self.is_authority_terminator(byte) || self.state_override.is_some() {
            if !self.buffer.is_empty() {
                let Some(port) = parse_port(&self.buffer) else {
                    self.url.validation_error = true;
                    return Err(ParseError::InvalidPort);
                };
                if scheme::default_port(&self.url.scheme) == Some(port) {
                    self.url.port = None;
                } else {
                    self.url.port = Some(port);
                }
                self.buffer.clear();
            }
            if self.state_override.is_some() {
                return Ok(ParseAction::Success);
            }
            self.state = State::PathStart;
            Ok(ParseAction::Continue)
        } else {
            self.url.validation_error = true;
            Err(ParseError::InvalidPort)
        }
    }

    fn on_file(&mut self, byte: Option<u8>) -> Result<ParseAction> {
        self.url.scheme = String::from("file");

        if matches!(byte, Some(b'/') | Some(b'\\')) {
            if byte == Some(b'\\') {
                self.url.validation_error = true;
            }
            self.state = State::FileSlash;
            return Ok(ParseAction::Increment);
        }

        let file_base = self.base.filter(|base| base.scheme == "file");
        let Some(base) = file_base else {
            self.state = State::Path;
            return Ok(ParseAction::Continue);
        };

        match byte {
            None => {
                self.url.host = base.host.clone();
                self.url.path = base.path.clone();
                self.url.query = base.query.clone();
                Ok(ParseAction::Increment)
            }
            Some(b'?') => {
                self.url.host = base.host.clone();
                self.url.path = base.path.clone();
                self.url.query = Some(String::new());
                self.state = State::Query;
                Ok(ParseAction::Increment)
            }
            Some(b'#') => {
                self.url.host = base.host.clone();
                self.url.path = base.path.clone();
                self.url.query = base.query.clone();
                self.url.fragment = Some(String::new());
                self.state = State::Fragment;
                Ok(ParseAction::Increment)
            }
            Some(_) => {
                if is_windows_drive_letter(self.lookahead()) {
                    // the input replaces the base path wholesale
                    self.url.validation_error = true;
                } else {
                    self.url.host = base.host.clone();
                    self.url.path = base.path.clone();
                    shorten_path(&self.url.scheme, &mut self.url.path);
                }
                self.state = State::Path;
                Ok(ParseAction::Continue)
            }
        }
    }

    fn on_file_slash(&mut self, byte: Option<u8>) -> Result<ParseAction> {
        if matches!(byte, Some(b'/') | Some(b'\\')) {
            if byte == Some(b'\\') {
                self.url.validation_error = true;
            }
            self.state = State::FileHost;
            return Ok(ParseAction::Increment);
        }

        if let Some(base) = self.base.filter(|base| base.scheme == "file") {
            if !is_windows_drive_letter(self.lookahead()) {
                match base.path.first() {
                    Some(first) if is_windows_drive_letter(first.as_bytes()) => {
                        self.url.path.push(first.clone());
                    }
                    _ => self.url.host = base.host.clone(),
                }
            }
        }
        self.state = State::Path;
        Ok(ParseAction::Continue)
    }

    fn on_file_host(&mut self, byte: Option<u8>) -> Result<ParseAction> {
        match byte {
            None | Some(b'/' | b'\\' | b'?' | b'#') => {
                if self.state_override.is_none() && is_windows_drive_letter(&self.buffer) {
                    // not a host after all; the path state picks the buffer up
                    self.url.validation_error = true;
                    self.state = State::Path;
                    return Ok(ParseAction::Continue);
                }

                if self.buffer.is_empty() {
                    self.url.host = Some(Host::Empty);
                    if self.state_override.is_some() {
                        return Ok(ParseAction::Success);
                    }
                    self.state = State::PathStart;
                    return Ok(ParseAction::Continue);
                }

                let mut host = parse_host(
                    &self.buffer,
                    !self.url.is_special(),
                    &mut self.url.validation_error,
                )?;
                if matches!(&host, Host::Domain(domain) if domain == "localhost") {
                    host = Host::Empty;
                }
                self.url.host = Some(host);
                if self.state_override.is_some() {
                    return Ok(ParseAction::Success);
                }
                self.buffer.clear();
                self.state = State::PathStart;
                Ok(ParseAction::Continue)
            }
            Some(b) => {
                self.buffer.push(b);
                Ok(ParseAction::Increment)
            }
        }
    }

    fn on_path_start(&mut self, byte: Option<u8>) -> Result<ParseAction> {
        if self.url.is_special() {
            if byte == Some(b'\\') {
                self.url.validation_error = true;
            }
            self.state = State::Path;
            if matches!(byte, Some(b'/') | Some(b'\\')) {
                Ok(ParseAction::Increment)
            } else {
                Ok(ParseAction::Continue)
            }
        } else if self.state_override.is_none() && byte == Some(b'?') {
            self.url.query = Some(String::new());
            self.state = State::Query;
            Ok(ParseAction::Increment)
        } else if self.state_override.is_none() && byte == Some(b'#') {
            self.url.fragment = Some(String::new());
            self.state = State::Fragment;
            Ok(ParseAction::Increment)
        } else if byte.is_some() {
            self.state = State::Path;
            if byte == Some(b'/') {
                Ok(ParseAction::Increment)
            } else {
                Ok(ParseAction::Continue)
            }
        } else {
            Ok(ParseAction::Increment)
        }
    }

    fn on_path(&mut self, byte: Option<u8>) -> Result<ParseAction> {
        let special_backslash = byte == Some(b'\\') && self.url.is_special();
        let at_terminator = byte.is_none()
            || byte == Some(b'/')
            || special_backslash
            || (self.state_override.is_none() && matches!(byte, Some(b'?') | Some(b'#')));

        if !at_terminator {
            if let Some(b) = byte {
                pct_encode_byte_to_buffer(&mut self.buffer, b, PATH);
            }
            return Ok(ParseAction::Increment);
        }

        if special_backslash {
            self.url.validation_error = true;
        }
        let ends_segment = byte == Some(b'/') || special_backslash;

        if is_double_dot_segment(&self.buffer) {
            shorten_path(&self.url.scheme, &mut self.url.path);
            if !ends_segment {
                self.url.path.push(String::new());
            }
        } else if is_single_dot_segment(&self.buffer) {
            if !ends_segment {
                self.url.path.push(String::new());
            }
        } else {
            if self.url.scheme == "file"
                && self.url.path.is_empty()
                && is_windows_drive_letter(&self.buffer)
            {
                if self.url.host.as_ref().map_or(true, |host| !host.is_empty()) {
                    self.url.validation_error = true;
                    self.url.host = Some(Host::Empty);
                }
                self.buffer[1] = b':';
            }
            self.url.path.push(ascii_string(&self.buffer));
        }
        self.buffer.clear();

        if self.url.scheme == "file" && matches!(byte, None | Some(b'?') | Some(b'#')) {
            while self.url.path.len() > 1 && self.url.path[0].is_empty() {
                self.url.validation_error = true;
                self.url.path.remove(0);
            }
        }

        if byte == Some(b'?') {
            self.url.query = Some(String::new());
            self.state = State::Query;
        }
        if byte == Some(b'#') {
            self.url.fragment = Some(String::new());
            self.state = State::Fragment;
        }
        Ok(ParseAction::Increment)
    }

    fn on_cannot_be_a_base_url_path(&mut self, byte: Option<u8>) -> Result<ParseAction> {
        match byte {
            Some(b'?') => {
                self.url.query = Some(String::new());
                self.state = State::Query;
            }
            Some(b'#') => {
                self.url.fragment = Some(String::new());
                self.state = State::Fragment;
            }
            Some(b) => {
                if !is_url_code_point(b) && b != b'%' {
                    self.url.validation_error = true;
                } else if b == b'%' && !is_pct_encoded(self.input.as_ref(), self.cursor) {
                    self.url.validation_error = true;
                }
                if let Some(first) = self.url.path.first_mut() {
                    pct_encode_byte_into(first, b, C0_CONTROL);
                }
            }
            None => {}
        }
        Ok(ParseAction::Increment)
    }

    fn on_query(&mut self, byte: Option<u8>) -> Result<ParseAction> {
        if self.state_override.is_none() && byte == Some(b'#') {
            self.url.fragment = Some(String::new());
            self.state = State::Fragment;
        } else if let Some(b) = byte {
            if let Some(query) = self.url.query.as_mut() {
                pct_encode_byte_into(query, b, QUERY);
            }
        }
        Ok(ParseAction::Increment)
    }

    fn on_fragment(&mut self, byte: Option<u8>) -> Result<ParseAction> {
        match byte {
            Some(0) => self.url.validation_error = true,
            Some(b) => {
                if let Some(fragment) = self.url.fragment.as_mut() {
                    pct_encode_byte_into(fragment, b, FRAGMENT);
                }
            }
            None => {}
        }
        Ok(ParseAction::Increment)
    }
}

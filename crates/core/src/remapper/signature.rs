//! Generic signature rewriting (JVMS 4.7.9.1).
//!
//! The signature is copied through unchanged except for class type names,
//! which are remapped. Inner class suffixes (`Outer<T>.Inner`) are remapped as
//! the binary name `Outer$Inner` and re-emitted as the simple name that
//! follows the last `$` of the result.

use super::Remapper;
use classmap_api::{VisitError, VisitResult};

pub(super) fn remap<R: Remapper + ?Sized>(
    remapper: &R,
    signature: &str,
    is_field: bool,
) -> VisitResult<String> {
    if signature.is_empty() {
        return Ok(String::new());
    }
    let mut rewriter = SignatureRewriter {
        remapper,
        source: signature,
        pos: 0,
        out: String::with_capacity(signature.len()),
    };
    if is_field {
        rewriter.type_signature()?;
    } else {
        if rewriter.peek() == Some(b'<') {
            rewriter.type_parameters()?;
        }
        if rewriter.peek() == Some(b'(') {
            rewriter.method_tail()?;
        } else {
            rewriter.class_tail()?;
        }
    }
    if rewriter.pos != signature.len() {
        return Err(rewriter.error("unexpected trailing characters"));
    }
    Ok(rewriter.out)
}

struct SignatureRewriter<'s, R: ?Sized> {
    remapper: &'s R,
    source: &'s str,
    pos: usize,
    out: String,
}

impl<'s, R: Remapper + ?Sized> SignatureRewriter<'s, R> {
    fn peek(&self) -> Option<u8> {
        self.source.as_bytes().get(self.pos).copied()
    }

    fn error(&self, reason: &str) -> VisitError {
        VisitError::MalformedSignature {
            signature: self.source.to_string(),
            offset: self.pos,
            reason: reason.to_string(),
        }
    }

    fn expect(&mut self, expected: u8) -> VisitResult<()> {
        if self.peek() != Some(expected) {
            return Err(self.error(&format!("expected `{}`", expected as char)));
        }
        self.pos += 1;
        self.out.push(expected as char);
        Ok(())
    }

    /// Reads up to (not including) the first byte in `stops`.
    fn identifier(&mut self, stops: &[u8]) -> VisitResult<&'s str> {
        let source = self.source;
        let start = self.pos;
        let rest = &source.as_bytes()[start..];
        let len = rest
            .iter()
            .position(|b| stops.contains(b))
            .ok_or_else(|| self.error("unterminated identifier"))?;
        if len == 0 {
            return Err(self.error("empty identifier"));
        }
        self.pos += len;
        // Stops are ASCII, so `start..pos` is on char boundaries.
        Ok(&source[start..self.pos])
    }

    fn type_parameters(&mut self) -> VisitResult<()> {
        self.expect(b'<')?;
        while self.peek() != Some(b'>') {
            let name = self.identifier(b":")?;
            self.out.push_str(name);
            // Class bound, possibly empty when only interface bounds follow.
            self.expect(b':')?;
            if matches!(self.peek(), Some(b'L' | b'T' | b'[')) {
                self.reference_type()?;
            }
            while self.peek() == Some(b':') {
                self.expect(b':')?;
                self.reference_type()?;
            }
            if self.peek().is_none() {
                return Err(self.error("unterminated type parameters"));
            }
        }
        self.expect(b'>')
    }

    fn method_tail(&mut self) -> VisitResult<()> {
        self.expect(b'(')?;
        while self.peek() != Some(b')') {
            if self.peek().is_none() {
                return Err(self.error("unterminated parameter list"));
            }
            self.type_signature()?;
        }
        self.expect(b')')?;
        if self.peek() == Some(b'V') {
            self.expect(b'V')?;
        } else {
            self.type_signature()?;
        }
        while self.peek() == Some(b'^') {
            self.expect(b'^')?;
            self.reference_type()?;
        }
        Ok(())
    }

    /// Superclass signature followed by the superinterface signatures.
    fn class_tail(&mut self) -> VisitResult<()> {
        self.class_type()?;
        while self.peek().is_some() {
            self.class_type()?;
        }
        Ok(())
    }

    fn type_signature(&mut self) -> VisitResult<()> {
        match self.peek() {
            Some(code @ (b'B' | b'C' | b'D' | b'F' | b'I' | b'J' | b'S' | b'Z')) => {
                self.expect(code)
            }
            _ => self.reference_type(),
        }
    }

    fn reference_type(&mut self) -> VisitResult<()> {
        match self.peek() {
            Some(b'L') => self.class_type(),
            Some(b'T') => {
                self.expect(b'T')?;
                let variable = self.identifier(b";")?;
                self.out.push_str(variable);
                self.expect(b';')
            }
            Some(b'[') => {
                self.expect(b'[')?;
                self.type_signature()
            }
            _ => Err(self.error("expected a reference type")),
        }
    }

    fn class_type(&mut self) -> VisitResult<()> {
        self.expect(b'L')?;
        let mut binary_name = self.identifier(b"<.;")?.to_string();
        let mapped = self.remapper.map_type(&binary_name)?;
        self.out.push_str(&mapped);
        if self.peek() == Some(b'<') {
            self.type_arguments()?;
        }
        while self.peek() == Some(b'.') {
            self.expect(b'.')?;
            let inner = self.identifier(b"<.;")?;
            binary_name = format!("{}${}", binary_name, inner);
            let mapped = self.remapper.map_type(&binary_name)?;
            let simple = mapped.rsplit('$').next().unwrap_or(&mapped);
            self.out.push_str(simple);
            if self.peek() == Some(b'<') {
                self.type_arguments()?;
            }
        }
        self.expect(b';')
    }

    fn type_arguments(&mut self) -> VisitResult<()> {
        self.expect(b'<')?;
        while self.peek() != Some(b'>') {
            match self.peek() {
                Some(b'*') => self.expect(b'*')?,
                Some(wildcard @ (b'+' | b'-')) => {
                    self.expect(wildcard)?;
                    self.reference_type()?;
                }
                None => return Err(self.error("unterminated type arguments")),
                _ => self.reference_type()?,
            }
        }
        self.expect(b'>')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remapper::IdentityRemapper;

    struct Table;

    impl Remapper for Table {
        fn map(&self, internal_name: &str) -> VisitResult<Option<String>> {
            Ok(match internal_name {
                "a/B" => Some("x/Y".to_string()),
                "a/Outer" => Some("x/Outer".to_string()),
                "a/Outer$Inner" => Some("x/Outer$Renamed".to_string()),
                _ => None,
            })
        }
    }

    #[test]
    fn test_identity_round_trips_real_signatures() {
        let cases = [
            ("<T:Ljava/lang/Object;>Ljava/lang/Object;Ljava/lang/Comparable<TT;>;", false),
            ("<K:Ljava/lang/Object;V::Ljava/io/Serializable;>(TK;[TV;)Ljava/util/Map<TK;TV;>;^Ljava/io/IOException;^TX;", false),
            ("(Ljava/util/List<+Ljava/lang/Number;>;Ljava/util/Set<*>;)V", false),
            ("Ljava/util/List<-La/B;>;", true),
            ("La/Outer<TT;>.Inner<Ljava/lang/String;>;", true),
            ("TT;", true),
            ("[I", true),
        ];
        for (signature, is_field) in cases {
            assert_eq!(remap(&IdentityRemapper, signature, is_field).unwrap(), signature);
        }
    }

    #[test]
    fn test_class_names_are_remapped_everywhere() {
        assert_eq!(
            remap(&Table, "<T:La/B;>La/B;Ljava/lang/Comparable<La/B;>;", false).unwrap(),
            "<T:Lx/Y;>Lx/Y;Ljava/lang/Comparable<Lx/Y;>;"
        );
        assert_eq!(
            remap(&Table, "(Ljava/util/List<+La/B;>;)[La/B;^La/B;", false).unwrap(),
            "(Ljava/util/List<+Lx/Y;>;)[Lx/Y;^Lx/Y;"
        );
    }

    #[test]
    fn test_inner_class_suffix_uses_binary_name() {
        assert_eq!(
            remap(&Table, "La/Outer<TT;>.Inner;", true).unwrap(),
            "Lx/Outer<TT;>.Renamed;"
        );
    }

    #[test]
    fn test_empty_signature_is_kept() {
        assert_eq!(remap(&Table, "", false).unwrap(), "");
        assert_eq!(remap(&Table, "", true).unwrap(), "");
        assert_eq!(
            Table.map_signature(Some(""), false).unwrap(),
            Some(String::new())
        );
    }

    #[test]
    fn test_malformed_signatures_report_offset() {
        let err = remap(&IdentityRemapper, "La/B", true).unwrap_err();
        assert!(matches!(err, VisitError::MalformedSignature { .. }));

        let err = remap(&IdentityRemapper, "Ljava/util/List<TT;", true).unwrap_err();
        match err {
            VisitError::MalformedSignature { offset, .. } => assert_eq!(offset, 19),
            other => panic!("unexpected error: {other}"),
        }

        assert!(remap(&IdentityRemapper, "(I", false).is_err());
        assert!(remap(&IdentityRemapper, "La/B;X", true).is_err());
    }
}

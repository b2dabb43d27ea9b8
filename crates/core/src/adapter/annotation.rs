use crate::remapper::Remapper;
use classmap_api::{AnnotationHandle, AnnotationVisitor, Value, VisitResult};

/// Remaps enum constant types, nested annotation types and class literals
/// of an annotation value tree. Arrays and nested annotations are wrapped
/// again so the whole tree is covered.
pub struct AnnotationRemapper<'a> {
    next: Box<dyn AnnotationVisitor + 'a>,
    remapper: &'a dyn Remapper,
}

impl<'a> AnnotationRemapper<'a> {
    pub fn new(next: Box<dyn AnnotationVisitor + 'a>, remapper: &'a dyn Remapper) -> Self {
        Self { next, remapper }
    }

    pub(crate) fn boxed(
        next: Box<dyn AnnotationVisitor + 'a>,
        remapper: &'a dyn Remapper,
    ) -> Box<dyn AnnotationVisitor + 'a> {
        Box::new(Self::new(next, remapper))
    }
}

impl AnnotationVisitor for AnnotationRemapper<'_> {
    fn visit(&mut self, name: Option<&str>, value: &Value) -> VisitResult<()> {
        let value = self.remapper.map_value(value)?;
        self.next.visit(name, &value)
    }

    fn visit_enum(&mut self, name: Option<&str>, descriptor: &str, value: &str) -> VisitResult<()> {
        let descriptor = self.remapper.map_desc(descriptor)?;
        self.next.visit_enum(name, &descriptor, value)
    }

    fn visit_annotation(
        &mut self,
        name: Option<&str>,
        descriptor: &str,
    ) -> VisitResult<AnnotationHandle<'_>> {
        let descriptor = self.remapper.map_desc(descriptor)?;
        Ok(self
            .next
            .visit_annotation(name, &descriptor)?
            .map(|av| AnnotationRemapper::boxed(av, self.remapper)))
    }

    fn visit_array(&mut self, name: Option<&str>) -> VisitResult<AnnotationHandle<'_>> {
        Ok(self
            .next
            .visit_array(name)?
            .map(|av| AnnotationRemapper::boxed(av, self.remapper)))
    }

    fn visit_end(&mut self) -> VisitResult<()> {
        self.next.visit_end()
    }
}

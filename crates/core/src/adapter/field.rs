use super::AnnotationRemapper;
use crate::remapper::Remapper;
use classmap_api::{AnnotationHandle, FieldVisitor, VisitResult};

pub struct FieldRemapper<'a> {
    next: Box<dyn FieldVisitor + 'a>,
    remapper: &'a dyn Remapper,
}

impl<'a> FieldRemapper<'a> {
    pub fn new(next: Box<dyn FieldVisitor + 'a>, remapper: &'a dyn Remapper) -> Self {
        Self { next, remapper }
    }
}

impl FieldVisitor for FieldRemapper<'_> {
    fn visit_annotation(
        &mut self,
        descriptor: &str,
        visible: bool,
    ) -> VisitResult<AnnotationHandle<'_>> {
        let descriptor = self.remapper.map_desc(descriptor)?;
        Ok(self
            .next
            .visit_annotation(&descriptor, visible)?
            .map(|av| AnnotationRemapper::boxed(av, self.remapper)))
    }

    fn visit_end(&mut self) -> VisitResult<()> {
        self.next.visit_end()
    }
}

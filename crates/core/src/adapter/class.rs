use super::{AdapterFactory, DefaultAdapterFactory, InnerNamePolicy, RemapContext};
use crate::remapper::Remapper;
use classmap_api::{
    AnnotationHandle, ClassHeader, ClassVisitor, FieldDescriptor, FieldHandle, InnerClassLink,
    MethodDescriptor, MethodHandle, OuterClassLink, VisitResult,
};
use tracing::{debug, trace};

/// Remaps every identifier of a class traversal before forwarding it to
/// `next`.
///
/// One instance serves one traversal: the header event fixes the class name
/// used as the owner key of all member lookups, and a second header is an
/// error.
pub struct ClassRemapper<C, R> {
    next: C,
    remapper: R,
    context: RemapContext,
    factory: Box<dyn AdapterFactory>,
    inner_names: InnerNamePolicy,
}

impl<C: ClassVisitor, R: Remapper> ClassRemapper<C, R> {
    pub fn new(next: C, remapper: R) -> Self {
        Self {
            next,
            remapper,
            context: RemapContext::new(),
            factory: Box::new(DefaultAdapterFactory),
            inner_names: InnerNamePolicy::default(),
        }
    }

    pub fn with_factory(mut self, factory: impl AdapterFactory + 'static) -> Self {
        self.factory = Box::new(factory);
        self
    }

    pub fn with_inner_name_policy(mut self, policy: InnerNamePolicy) -> Self {
        self.inner_names = policy;
        self
    }

    /// Original name of the traversed class, once the header was seen.
    pub fn class_name(&self) -> Option<&str> {
        self.context.get()
    }

    pub fn remapper(&self) -> &R {
        &self.remapper
    }

    pub fn inner(&self) -> &C {
        &self.next
    }

    pub fn into_inner(self) -> C {
        self.next
    }

    fn map_inner_name(&self, link: &InnerClassLink, mapped_name: &str) -> Option<String> {
        let inner_name = link.inner_name.as_deref()?;
        match self.inner_names {
            InnerNamePolicy::Preserve => Some(inner_name.to_string()),
            InnerNamePolicy::DeriveFromMappedName if mapped_name == link.name => {
                Some(inner_name.to_string())
            }
            InnerNamePolicy::DeriveFromMappedName => {
                let simple = match mapped_name.rfind('$') {
                    Some(idx) => &mapped_name[idx + 1..],
                    None => mapped_name.rsplit('/').next().unwrap_or(mapped_name),
                };
                Some(simple.to_string())
            }
        }
    }
}

impl<C: ClassVisitor, R: Remapper> ClassVisitor for ClassRemapper<C, R> {
    fn visit_header(&mut self, header: ClassHeader) -> VisitResult<()> {
        self.context.enter(&header.name)?;

        let remapped = ClassHeader {
            version: header.version,
            access: header.access,
            name: self.remapper.map_type(&header.name)?,
            signature: self
                .remapper
                .map_signature(header.signature.as_deref(), false)?,
            super_name: header
                .super_name
                .as_deref()
                .map(|name| self.remapper.map_type(name))
                .transpose()?,
            interfaces: header
                .interfaces
                .as_deref()
                .map(|names| self.remapper.map_types(names))
                .transpose()?,
        };
        trace!("Remapped class {} -> {}", header.name, remapped.name);
        self.next.visit_header(remapped)
    }

    fn visit_source(&mut self, source: Option<&str>, debug: Option<&str>) -> VisitResult<()> {
        self.next.visit_source(source, debug)
    }

    fn visit_outer_class(&mut self, link: OuterClassLink) -> VisitResult<()> {
        self.context.class_name("visit_outer_class")?;

        // An absent descriptor is looked up as "", which only name-only
        // entries of a mapping table match.
        let name = link
            .name
            .as_deref()
            .map(|name| {
                let descriptor = link.descriptor.as_deref().unwrap_or_default();
                self.remapper.map_method_name(&link.owner, name, descriptor)
            })
            .transpose()?;
        let remapped = OuterClassLink {
            owner: self.remapper.map_type(&link.owner)?,
            name,
            descriptor: link
                .descriptor
                .as_deref()
                .map(|descriptor| self.remapper.map_method_desc(descriptor))
                .transpose()?,
        };
        self.next.visit_outer_class(remapped)
    }

    fn visit_annotation(
        &mut self,
        descriptor: &str,
        visible: bool,
    ) -> VisitResult<AnnotationHandle<'_>> {
        self.context.class_name("visit_annotation")?;

        let mapped = self.remapper.map_type(descriptor)?;
        match self.next.visit_annotation(&mapped, visible)? {
            Some(av) => Ok(Some(self.factory.annotation_adapter(av, &self.remapper))),
            None => {
                debug!("Downstream declined annotation {}", mapped);
                Ok(None)
            }
        }
    }

    fn visit_inner_class(&mut self, link: InnerClassLink) -> VisitResult<()> {
        self.context.class_name("visit_inner_class")?;

        let name = self.remapper.map_type(&link.name)?;
        let remapped = InnerClassLink {
            inner_name: self.map_inner_name(&link, &name),
            outer_name: link
                .outer_name
                .as_deref()
                .map(|outer| self.remapper.map_type(outer))
                .transpose()?,
            name,
            access: link.access,
        };
        self.next.visit_inner_class(remapped)
    }

    fn visit_field(&mut self, field: FieldDescriptor) -> VisitResult<FieldHandle<'_>> {
        let owner = self.context.class_name("visit_field")?;

        // The name lookup is keyed by the original descriptor.
        let remapped = FieldDescriptor {
            access: field.access,
            name: self
                .remapper
                .map_field_name(owner, &field.name, &field.descriptor)?,
            descriptor: self.remapper.map_desc(&field.descriptor)?,
            signature: self
                .remapper
                .map_signature(field.signature.as_deref(), true)?,
            value: field
                .value
                .as_ref()
                .map(|value| self.remapper.map_value(value))
                .transpose()?,
        };
        trace!("Remapped field {}.{} -> {}", owner, field.name, remapped.name);

        match self.next.visit_field(remapped)? {
            Some(fv) => Ok(Some(self.factory.field_adapter(fv, &self.remapper))),
            None => {
                debug!("Downstream declined field {}", field.name);
                Ok(None)
            }
        }
    }

    fn visit_method(&mut self, method: MethodDescriptor) -> VisitResult<MethodHandle<'_>> {
        let owner = self.context.class_name("visit_method")?;

        let descriptor = self.remapper.map_method_desc(&method.descriptor)?;
        let remapped = MethodDescriptor {
            access: method.access,
            name: self
                .remapper
                .map_method_name(owner, &method.name, &method.descriptor)?,
            descriptor: descriptor.clone(),
            signature: self
                .remapper
                .map_signature(method.signature.as_deref(), false)?,
            exceptions: method
                .exceptions
                .as_deref()
                .map(|names| self.remapper.map_types(names))
                .transpose()?,
        };
        trace!(
            "Remapped method {}.{}{} -> {}{}",
            owner, method.name, method.descriptor, remapped.name, descriptor
        );

        match self.next.visit_method(remapped)? {
            Some(mv) => Ok(Some(self.factory.method_adapter(
                method.access,
                &descriptor,
                mv,
                &self.remapper,
            ))),
            None => {
                debug!("Downstream declined method {}{}", method.name, method.descriptor);
                Ok(None)
            }
        }
    }

    fn visit_end(&mut self) -> VisitResult<()> {
        self.next.visit_end()
    }
}

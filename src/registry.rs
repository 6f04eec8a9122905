//! Module registration table
//!
//! A `Module` is a flat, ordered table from export names to behaviours:
//! functions (with named parameters and defaults), classes, enums and
//! constant attributes. Calls bind arguments the way a scripting runtime
//! does: positional first, then keywords, then declared defaults.
//!
//! Class methods and enum members are addressed with dotted names
//! (`AdultPerson.greet`, `AdultPerson.get_name`, `Color.BLACK`). Instance
//! methods take the object as their first parameter, `self`.
//!
//! Author: ALICE-BIND contributors

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::attr::{self, AttributeBag};
use crate::error::{BindError, Result};
use crate::value::{NativeFn, Value};

// ============================================================================
// Definitions
// ============================================================================

/// Function parameter with an optional default
#[derive(Debug, Clone)]
pub struct Param {
    /// Parameter name
    pub name: &'static str,
    /// Value used when the caller omits the argument
    pub default: Option<Value>,
}

impl Param {
    /// Required parameter
    pub fn required(name: &'static str) -> Self {
        Param { name, default: None }
    }

    /// Parameter with a default
    pub fn optional(name: &'static str, default: impl Into<Value>) -> Self {
        Param {
            name,
            default: Some(default.into()),
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.default {
            Some(default) => write!(f, "{}={}", self.name, default.repr()),
            None => f.write_str(self.name),
        }
    }
}

/// Registered function
#[derive(Clone)]
pub struct FunctionDef {
    /// Export name
    pub name: String,
    /// One-line description
    pub doc: &'static str,
    /// Declared parameters
    pub params: Vec<Param>,
    body: Arc<NativeFn>,
}

impl FunctionDef {
    /// Define a function; `body` receives one value per parameter, defaults filled in
    pub fn new<F>(name: impl Into<String>, doc: &'static str, params: Vec<Param>, body: F) -> Self
    where
        F: Fn(Vec<Value>) -> Result<Value> + Send + Sync + 'static,
    {
        FunctionDef {
            name: name.into(),
            doc,
            params,
            body: Arc::new(body),
        }
    }

    /// `name(a, b=0)`
    pub fn signature(&self) -> String {
        let params: Vec<String> = self.params.iter().map(Param::to_string).collect();
        format!("{}({})", self.name, params.join(", "))
    }

    /// Bind arguments and invoke
    pub fn call(&self, args: Vec<Value>, kwargs: BTreeMap<String, Value>) -> Result<Value> {
        let bound = bind_arguments(&self.name, &self.params, args, kwargs)?;
        trace!(function = %self.name, args = ?bound, "dispatch");
        (self.body)(bound)
    }
}

impl fmt::Debug for FunctionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.signature())
    }
}

/// Property exposed on class instances
#[derive(Debug, Clone)]
pub struct PropertyDef {
    /// Property name
    pub name: &'static str,
    /// Whether a setter exists
    pub writable: bool,
}

/// Registered class
#[derive(Debug, Clone)]
pub struct ClassDef {
    /// Class name
    pub name: String,
    /// One-line description
    pub doc: &'static str,
    /// Constructor (invoked by calling the class name)
    pub constructor: FunctionDef,
    /// Instance properties
    pub properties: Vec<PropertyDef>,
    /// Instance methods; the first parameter receives the object
    pub methods: Vec<FunctionDef>,
    /// Static methods
    pub static_methods: Vec<FunctionDef>,
}

/// Registered enumeration
#[derive(Debug, Clone)]
pub struct EnumDef {
    /// Enum name
    pub name: String,
    /// Members in declaration order
    pub members: Vec<(&'static str, Value)>,
}

/// One table entry
#[derive(Debug, Clone)]
pub enum Export {
    /// Free function
    Function(FunctionDef),
    /// Class
    Class(ClassDef),
    /// Enumeration
    Enum(EnumDef),
    /// Constant attribute
    Attribute(Value),
}

impl ClassDef {
    /// Instance or static method by name
    pub fn method(&self, name: &str) -> Option<&FunctionDef> {
        self.methods
            .iter()
            .chain(&self.static_methods)
            .find(|f| f.name == name)
    }

    /// Property by name
    pub fn property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.iter().find(|p| p.name == name)
    }
}

impl Export {
    /// `function`, `class`, `enum` or `attribute`
    pub fn kind(&self) -> &'static str {
        match self {
            Export::Function(_) => "function",
            Export::Class(_) => "class",
            Export::Enum(_) => "enum",
            Export::Attribute(_) => "attribute",
        }
    }

    /// Short human-readable summary
    pub fn summary(&self) -> String {
        match self {
            Export::Function(f) => format!("{}  {}", f.signature(), f.doc),
            Export::Class(c) => {
                let props: Vec<String> = c
                    .properties
                    .iter()
                    .map(|p| if p.writable { format!("{} (rw)", p.name) } else { p.name.to_string() })
                    .collect();
                let methods: Vec<String> = c.methods.iter().map(FunctionDef::signature).collect();
                let statics: Vec<String> =
                    c.static_methods.iter().map(FunctionDef::signature).collect();
                format!(
                    "{}  properties: [{}] methods: [{}] static: [{}]",
                    c.constructor.signature(),
                    props.join(", "),
                    methods.join(", "),
                    statics.join(", ")
                )
            }
            Export::Enum(e) => {
                let members: Vec<String> = e
                    .members
                    .iter()
                    .map(|(name, value)| match value.as_object("member").ok().and_then(|o| o.lookup("value")) {
                        Some(v) => format!("{}={}", name, v),
                        None => name.to_string(),
                    })
                    .collect();
                format!("{} {{{}}}", e.name, members.join(", "))
            }
            Export::Attribute(v) => v.repr(),
        }
    }
}

// ============================================================================
// Module
// ============================================================================

/// Flat registration table
#[derive(Debug, Clone)]
pub struct Module {
    name: String,
    doc: String,
    exports: Vec<(String, Export)>,
}

impl Module {
    /// Empty module
    pub fn new(name: impl Into<String>, doc: impl Into<String>) -> Self {
        Module {
            name: name.into(),
            doc: doc.into(),
            exports: Vec::new(),
        }
    }

    /// Module name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Module docstring
    pub fn doc(&self) -> &str {
        &self.doc
    }

    fn insert(&mut self, name: String, export: Export) -> &mut Self {
        debug!(module = %self.name, export = %name, kind = export.kind(), "register");
        match self.exports.iter_mut().find(|(n, _)| *n == name) {
            // Re-registration replaces, like assigning a module attribute twice
            Some(slot) => slot.1 = export,
            None => self.exports.push((name, export)),
        }
        self
    }

    /// Register a function
    pub fn def(&mut self, function: FunctionDef) -> &mut Self {
        self.insert(function.name.clone(), Export::Function(function))
    }

    /// Register a class
    pub fn add_class(&mut self, class: ClassDef) -> &mut Self {
        self.insert(class.name.clone(), Export::Class(class))
    }

    /// Register an enum
    pub fn add_enum(&mut self, def: EnumDef) -> &mut Self {
        self.insert(def.name.clone(), Export::Enum(def))
    }

    /// Register a constant attribute
    pub fn add_attribute(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.insert(name.into(), Export::Attribute(value.into()))
    }

    /// Export by top-level name
    pub fn get(&self, name: &str) -> Option<&Export> {
        self.exports.iter().find(|(n, _)| n == name).map(|(_, e)| e)
    }

    /// Registered names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.exports.iter().map(|(n, _)| n.as_str())
    }

    /// All exports in registration order
    pub fn exports(&self) -> impl Iterator<Item = (&str, &Export)> {
        self.exports.iter().map(|(n, e)| (n.as_str(), e))
    }

    /// Resolve a callable: function, class constructor or `Class.method`
    pub fn function(&self, name: &str) -> Result<&FunctionDef> {
        if let Some((class, method)) = name.split_once('.') {
            return match self.get(class) {
                Some(Export::Class(c)) => c
                    .method(method)
                    .ok_or_else(|| BindError::attribute_not_found(class, method)),
                Some(_) => Err(BindError::NotCallable(name.to_string())),
                None => Err(BindError::UnknownExport(class.to_string())),
            };
        }
        match self.get(name) {
            Some(Export::Function(f)) => Ok(f),
            Some(Export::Class(c)) => Ok(&c.constructor),
            Some(_) => Err(BindError::NotCallable(name.to_string())),
            None => Err(BindError::UnknownExport(name.to_string())),
        }
    }

    /// Call with positional arguments
    pub fn call(&self, name: &str, args: Vec<Value>) -> Result<Value> {
        self.call_with(name, args, BTreeMap::new())
    }

    /// Call with positional and keyword arguments
    pub fn call_with(
        &self,
        name: &str,
        args: Vec<Value>,
        kwargs: BTreeMap<String, Value>,
    ) -> Result<Value> {
        self.function(name)?.call(args, kwargs)
    }

    /// Registered class for an object, by its type name
    fn class_of(&self, obj: &dyn AttributeBag) -> Result<&ClassDef> {
        match self.get(obj.type_name()) {
            Some(Export::Class(c)) => Ok(c),
            _ => Err(BindError::UnknownExport(obj.type_name().to_string())),
        }
    }

    /// Call an instance method: `obj.method(*args)`
    pub fn call_method(&self, obj: &Value, method: &str, args: Vec<Value>) -> Result<Value> {
        let class = self.class_of(obj.as_object("self")?.as_ref())?;
        let function = class
            .methods
            .iter()
            .find(|f| f.name == method)
            .ok_or_else(|| BindError::attribute_not_found(&class.name, method))?;

        let mut bound = Vec::with_capacity(args.len() + 1);
        bound.push(obj.clone());
        bound.extend(args);
        function.call(bound, BTreeMap::new())
    }

    /// Assign a declared property: `obj.attribute = value`
    ///
    /// The property must be declared writable on the object's class; the
    /// object's own setter then validates the value.
    pub fn set_attr(&self, obj: &Value, attribute: &str, value: Value) -> Result<()> {
        let bag = obj.as_object("obj")?.as_ref();
        let class = self.class_of(bag)?;
        match class.property(attribute) {
            Some(p) if p.writable => attr::set_attribute(bag, attribute, value),
            Some(_) => Err(BindError::read_only(&class.name, attribute)),
            None => Err(BindError::attribute_not_found(&class.name, attribute)),
        }
    }

    /// Read an attribute or an enum member (`Color.BLACK`)
    pub fn attribute(&self, name: &str) -> Result<Value> {
        if let Some((owner, member)) = name.split_once('.') {
            return match self.get(owner) {
                Some(Export::Enum(e)) => e
                    .members
                    .iter()
                    .find(|(n, _)| *n == member)
                    .map(|(_, v)| v.clone())
                    .ok_or_else(|| BindError::attribute_not_found(owner, member)),
                Some(_) => Err(BindError::attribute_not_found(owner, member)),
                None => Err(BindError::UnknownExport(owner.to_string())),
            };
        }
        match self.get(name) {
            Some(Export::Attribute(v)) => Ok(v.clone()),
            Some(_) => Err(BindError::attribute_not_found("module", name)),
            None => Err(BindError::UnknownExport(name.to_string())),
        }
    }
}

// ============================================================================
// Argument binding
// ============================================================================

/// Bind positional and keyword arguments to `params`, filling defaults
pub fn bind_arguments(
    function: &str,
    params: &[Param],
    args: Vec<Value>,
    mut kwargs: BTreeMap<String, Value>,
) -> Result<Vec<Value>> {
    if args.len() > params.len() {
        return Err(BindError::TooManyArguments {
            function: function.to_string(),
            max: params.len(),
            given: args.len(),
        });
    }

    let mut slots: Vec<Option<Value>> = args.into_iter().map(Some).collect();
    slots.resize(params.len(), None);

    for (slot, param) in slots.iter_mut().zip(params) {
        if let Some(value) = kwargs.remove(param.name) {
            if slot.is_some() {
                return Err(BindError::DuplicateArgument {
                    function: function.to_string(),
                    argument: param.name.to_string(),
                });
            }
            *slot = Some(value);
        }
    }

    if let Some(unexpected) = kwargs.into_keys().next() {
        return Err(BindError::UnexpectedKeyword {
            function: function.to_string(),
            argument: unexpected,
        });
    }

    slots
        .into_iter()
        .zip(params)
        .map(|(slot, param)| {
            slot.or_else(|| param.default.clone())
                .ok_or_else(|| BindError::MissingArgument {
                    function: function.to_string(),
                    argument: param.name.to_string(),
                })
        })
        .collect()
}

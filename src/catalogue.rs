//! The exported table: every binding pattern registered under its public name.
//!
//! Author: ALICE-BIND contributors

use crate::attr::{get_attribute, get_attribute_detached, AttributeBag, NoInterpreterLock};
use crate::color::Color;
use crate::constants::{ones_list, FLOAT_NUMBER, INT_NUMBER};
use crate::functions::{self, ADD_FLOAT_DEFAULT_B, ADD_INT_DEFAULT_B, DEFAULT_N_ZEROS};
use crate::error::{BindError, Result};
use crate::person::{AdultPerson, SharedPerson};
use crate::registry::{ClassDef, EnumDef, FunctionDef, Module, Param, PropertyDef};
use crate::value::Value;
use crate::{MODULE_DOC, MODULE_NAME};

/// Build the module table
pub fn build_module() -> Module {
    let mut m = Module::new(MODULE_NAME, MODULE_DOC);

    // Basic
    m.def(FunctionDef::new("hello_world", "Print a greeting to the world", vec![], |_| {
        functions::hello_world();
        Ok(Value::None)
    }));
    m.def(FunctionDef::new(
        "greet",
        "Function that greet person",
        vec![Param::required("name")],
        |args| Ok(Value::from(functions::greet(args[0].as_str("name")?))),
    ));
    m.def(FunctionDef::new(
        "add_int",
        "Integer sum",
        vec![Param::required("a"), Param::optional("b", ADD_INT_DEFAULT_B)],
        |args| Ok(Value::Int(functions::add_int(args[0].as_int("a")?, args[1].as_int("b")?)?)),
    ));
    m.def(FunctionDef::new(
        "add_float",
        "Real sum",
        vec![Param::required("a"), Param::optional("b", ADD_FLOAT_DEFAULT_B)],
        |args| {
            Ok(Value::Float(functions::add_float(
                args[0].as_float("a")?,
                args[1].as_float("b")?,
            )))
        },
    ));

    // Containers
    m.def(FunctionDef::new(
        "get_n_zeros",
        "List of n zeros",
        vec![Param::optional("n", DEFAULT_N_ZEROS)],
        |args| Ok(Value::from(functions::get_n_zeros(args[0].as_count("n")?))),
    ));
    m.def(FunctionDef::new("get_map", "Fixed two-entry mapping", vec![], |_| {
        Ok(Value::from(functions::get_map()))
    }));

    // Attributes
    m.add_attribute("int_number", INT_NUMBER);
    m.add_attribute("float_number", FLOAT_NUMBER);
    m.add_attribute("ones_list", ones_list());

    // Class
    m.add_class(ClassDef {
        name: "AdultPerson".to_string(),
        doc: "Person record whose age never drops below the adult minimum",
        constructor: FunctionDef::new(
            "AdultPerson",
            "Construct from age and name (age not validated)",
            vec![Param::required("age"), Param::required("name")],
            |args| {
                let age = args[0].as_count("age")?;
                let name = args[1].as_str("name")?;
                Ok(Value::object(SharedPerson::new(AdultPerson::new(age, name))))
            },
        ),
        properties: vec![PropertyDef {
            name: "age",
            writable: true,
        }],
        methods: vec![
            FunctionDef::new("get_name", "Name of the person", vec![Param::required("self")], |args| {
                get_attribute(person_arg(&args[0])?, "name")
            }),
            FunctionDef::new("__repr__", "AdultPerson(age=.., name=..)", vec![Param::required("self")], |args| {
                Ok(Value::from(person_arg(&args[0])?.describe()))
            }),
        ],
        static_methods: vec![FunctionDef::new(
            "greet",
            "Print a greeting, generic when no name is given",
            vec![Param::optional("name", Value::None)],
            |args| {
                AdultPerson::greet(args[0].as_opt_str("name")?);
                Ok(Value::None)
            },
        )],
    });

    // Enum
    m.add_enum(EnumDef {
        name: "Color".to_string(),
        members: Color::ALL
            .into_iter()
            .map(|c| (c.name(), Value::object(c)))
            .collect(),
    });

    // Functional
    m.def(FunctionDef::new(
        "call_callback",
        "Invoke callback(n) once and return its list",
        vec![Param::required("callback"), Param::required("n")],
        |args| {
            let callback = args[0].as_callable("callback")?;
            let n = args[1].as_count("n")?;
            let result = functions::call_callback(
                |n| callback.call(vec![Value::from(n)])?.as_float_list("callback result"),
                n,
            )?;
            Ok(Value::from(result))
        },
    ));

    // Generic objects
    m.def(FunctionDef::new(
        "safe_get_attr",
        "getattr(obj, attr) with a trace of the lookup",
        vec![Param::required("obj"), Param::required("attr")],
        |args| get_attribute(args[0].as_object("obj")?.as_ref(), args[1].as_str("attr")?),
    ));
    m.def(FunctionDef::new(
        "unsafe_get_attr",
        "getattr(obj, attr) with the interpreter lock released",
        vec![Param::required("obj"), Param::required("attr")],
        |args| {
            get_attribute_detached(
                &NoInterpreterLock,
                args[0].as_object("obj")?.as_ref(),
                args[1].as_str("attr")?,
            )
        },
    ));

    m
}

/// `self` argument of an `AdultPerson` method
fn person_arg(value: &Value) -> Result<&dyn AttributeBag> {
    let obj = value.as_object("self")?;
    if obj.type_name() != "AdultPerson" {
        return Err(BindError::TypeMismatch {
            argument: "self".to_string(),
            expected: "AdultPerson",
            found: "object",
        });
    }
    Ok(obj.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Export;

    #[test]
    fn test_all_exports_registered() {
        let m = build_module();
        let names: Vec<&str> = m.names().collect();
        for expected in [
            "hello_world",
            "greet",
            "add_int",
            "add_float",
            "get_n_zeros",
            "get_map",
            "int_number",
            "float_number",
            "ones_list",
            "AdultPerson",
            "Color",
            "call_callback",
            "safe_get_attr",
            "unsafe_get_attr",
        ] {
            assert!(names.contains(&expected), "missing export {}", expected);
        }
    }

    #[test]
    fn test_kinds() {
        let m = build_module();
        assert_eq!(m.get("AdultPerson").map(Export::kind), Some("class"));
        assert_eq!(m.get("Color").map(Export::kind), Some("enum"));
        assert_eq!(m.get("ones_list").map(Export::kind), Some("attribute"));
        assert_eq!(m.get("greet").map(Export::kind), Some("function"));
    }

    #[test]
    fn test_person_methods_reject_other_objects() {
        let m = build_module();
        let black = m.attribute("Color.BLACK").unwrap();
        assert!(matches!(
            m.call("AdultPerson.get_name", vec![black]),
            Err(BindError::TypeMismatch { argument, .. }) if argument == "self"
        ));
    }
}

//! Raw `@collection` directive arguments (DTO layer).
//!
//! Argument values are type-checked here but not cross-validated: which
//! permissions are required depends on the access pattern and is checked by
//! the loader.

use graphql_parser::schema::{Directive, Value};

use super::loader::AuthoringError;

/// Arguments of one `@collection(...)` occurrence, as written in the schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionDirective {
    /// Name of the type carrying the directive.
    pub type_name: String,
    /// `name`
    pub name: Option<String>,
    /// `type`, still in its schema spelling.
    pub access_pattern: Option<String>,
    /// `readPermission`
    pub read_permission: Option<String>,
    /// `writePermission`
    pub write_permission: Option<String>,
    /// `updatePermission`
    pub update_permission: Option<String>,
    /// `deletePermission`
    pub delete_permission: Option<String>,
    /// `allowDelete`
    pub allow_delete: Option<bool>,
    /// `allowUpdate`
    pub allow_update: Option<bool>,
    /// `allowPublicRead`
    pub allow_public_read: Option<bool>,
}

impl CollectionDirective {
    /// Reads the arguments of a parsed directive.
    ///
    /// `null` values count as absent.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown or repeated argument names and for
    /// values of the wrong kind.
    pub fn from_ast(type_name: &str, directive: &Directive<'_, String>) -> Result<Self, AuthoringError> {
        let mut dto = Self {
            type_name: type_name.to_string(),
            ..Self::default()
        };

        for (argument, value) in &directive.arguments {
            if matches!(value, Value::Null) {
                continue;
            }
            let arg = Arg {
                type_name,
                name: argument,
                value,
            };
            match argument.as_str() {
                "name" => set_once(&arg, &mut dto.name, arg.string()?)?,
                "type" => set_once(&arg, &mut dto.access_pattern, arg.enum_value()?)?,
                "readPermission" => set_once(&arg, &mut dto.read_permission, arg.string()?)?,
                "writePermission" => set_once(&arg, &mut dto.write_permission, arg.string()?)?,
                "updatePermission" => set_once(&arg, &mut dto.update_permission, arg.string()?)?,
                "deletePermission" => set_once(&arg, &mut dto.delete_permission, arg.string()?)?,
                "allowDelete" => set_once(&arg, &mut dto.allow_delete, arg.boolean()?)?,
                "allowUpdate" => set_once(&arg, &mut dto.allow_update, arg.boolean()?)?,
                "allowPublicRead" => set_once(&arg, &mut dto.allow_public_read, arg.boolean()?)?,
                _ => {
                    return Err(AuthoringError::UnknownArgument {
                        type_name: type_name.to_string(),
                        argument: argument.clone(),
                    })
                }
            }
        }

        Ok(dto)
    }
}

struct Arg<'d, 'a> {
    type_name: &'d str,
    name: &'d str,
    value: &'d Value<'a, String>,
}

impl Arg<'_, '_> {
    fn string(&self) -> Result<String, AuthoringError> {
        match self.value {
            Value::String(s) => Ok(s.clone()),
            _ => Err(self.invalid("a string")),
        }
    }

    // Enum values are the documented form; string literals are accepted too.
    fn enum_value(&self) -> Result<String, AuthoringError> {
        match self.value {
            Value::Enum(s) | Value::String(s) => Ok(s.clone()),
            _ => Err(self.invalid("an enum value")),
        }
    }

    fn boolean(&self) -> Result<bool, AuthoringError> {
        match self.value {
            Value::Boolean(b) => Ok(*b),
            _ => Err(self.invalid("a boolean")),
        }
    }

    fn invalid(&self, expected: &'static str) -> AuthoringError {
        AuthoringError::InvalidArgument {
            type_name: self.type_name.to_string(),
            argument: self.name.to_string(),
            expected,
        }
    }
}

fn set_once<T>(arg: &Arg<'_, '_>, slot: &mut Option<T>, value: T) -> Result<(), AuthoringError> {
    if slot.is_some() {
        return Err(AuthoringError::RepeatedArgument {
            type_name: arg.type_name.to_string(),
            argument: arg.name.to_string(),
        });
    }
    *slot = Some(value);
    Ok(())
}

//! Input coercion of individual values: <https://spec.graphql.org/October2021/#sec-Input-Values>
//!
//! These are the primitives variable and argument coercion are built on.
//! [`StandardCoercion`] implements the rules of the GraphQL specification for built-in scalars,
//! enums, lists and input objects, and passes custom scalars through unchanged.

use std::fmt;

use apollo_compiler::Schema;
use apollo_compiler::ast;
use apollo_compiler::parser::SourceSpan;
use apollo_compiler::response::JsonMap;
use apollo_compiler::response::JsonValue;
use apollo_compiler::schema::EnumType;
use apollo_compiler::schema::ExtendedType;
use apollo_compiler::schema::InputObjectType;
use apollo_compiler::schema::Type;

use crate::error::CoercionError;
use crate::error::CoercionErrorKind;
use crate::values::CoercedValues;

/// Coercion of single values to a declared input type.
///
/// Implement this to customize how scalars are parsed, for example for custom scalars
/// with a known representation. Most users want [`StandardCoercion`].
pub trait InputCoercion {
    /// Coerces a literal from a GraphQL document, such as an argument value or a default value.
    ///
    /// Variable references are looked up in `variables`.
    /// Returns `None` if the literal is not a valid value of type `ty`.
    fn coerce_literal(
        &self,
        schema: &Schema,
        value: &ast::Value,
        ty: &Type,
        variables: Option<&CoercedValues>,
    ) -> Option<JsonValue>;

    /// Coerces an untrusted JSON value, such as a request variable.
    ///
    /// Every problem found is returned, each located at `location`.
    fn coerce_raw_value(
        &self,
        schema: &Schema,
        value: &JsonValue,
        ty: &Type,
        location: Option<SourceSpan>,
    ) -> Result<JsonValue, Vec<CoercionError>>;
}

/// Returns the definition of the named type at the core of `ty`, if the schema defines it
pub fn resolve_type<'schema>(schema: &'schema Schema, ty: &Type) -> Option<&'schema ExtendedType> {
    schema.types.get(ty.inner_named_type())
}

/// Whether values of this type can be inputs: scalars, enums and input objects
pub fn is_input_type(definition: &ExtendedType) -> bool {
    matches!(
        definition,
        ExtendedType::Scalar(_) | ExtendedType::Enum(_) | ExtendedType::InputObject(_)
    )
}

/// Returns the definition of the named type at the core of `ty`,
/// or `None` if it is undefined or not an input type.
pub fn resolve_input_type<'schema>(
    schema: &'schema Schema,
    ty: &Type,
) -> Option<&'schema ExtendedType> {
    resolve_type(schema, ty).filter(|definition| is_input_type(definition))
}

/// Input coercion as defined by the GraphQL specification
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCoercion;

impl InputCoercion for StandardCoercion {
    fn coerce_literal(
        &self,
        schema: &Schema,
        value: &ast::Value,
        ty: &Type,
        variables: Option<&CoercedValues>,
    ) -> Option<JsonValue> {
        coerce_literal(schema, value, ty, variables)
    }

    fn coerce_raw_value(
        &self,
        schema: &Schema,
        value: &JsonValue,
        ty: &Type,
        location: Option<SourceSpan>,
    ) -> Result<JsonValue, Vec<CoercionError>> {
        let mut errors = Vec::new();
        let coerced = RawCoercion {
            schema,
            location,
            errors: &mut errors,
        }
        .coerce(value, ty, None);
        if errors.is_empty() {
            Ok(coerced)
        } else {
            Err(errors)
        }
    }
}

/// Where in a raw value we are, as a linked list borrowed from the call stack
#[derive(Clone, Copy)]
struct InputPath<'a> {
    parent: Option<&'a InputPath<'a>>,
    segment: PathSegment<'a>,
}

#[derive(Clone, Copy)]
enum PathSegment<'a> {
    Field(&'a str),
    Index(usize),
}

impl fmt::Display for InputPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.parent {
            Some(parent) => write!(f, "{parent}")?,
            None => write!(f, "value")?,
        }
        match self.segment {
            PathSegment::Field(name) => write!(f, ".{name}"),
            PathSegment::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// Formats as ` at value.path` for nested values, and nothing at the top level
struct At<'a>(Option<&'a InputPath<'a>>);

impl fmt::Display for At<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(path) => write!(f, " at {path}"),
            None => Ok(()),
        }
    }
}

fn nested<'a>(parent: Option<&'a InputPath<'a>>, segment: PathSegment<'a>) -> InputPath<'a> {
    InputPath { parent, segment }
}

struct RawCoercion<'a> {
    schema: &'a Schema,
    location: Option<SourceSpan>,
    errors: &'a mut Vec<CoercionError>,
}

impl RawCoercion<'_> {
    fn error(&mut self, message: String) -> JsonValue {
        self.errors.push(CoercionError::new(
            CoercionErrorKind::InvalidValue,
            message,
            self.location,
        ));
        JsonValue::Null
    }

    fn coerce(&mut self, value: &JsonValue, ty: &Type, path: Option<&InputPath<'_>>) -> JsonValue {
        if value.is_null() {
            if ty.is_non_null() {
                return self.error(format!(
                    "Expected non-nullable type \"{ty}\" not to be null{}.",
                    At(path)
                ));
            }
            return JsonValue::Null;
        }
        match ty {
            Type::List(item_ty) | Type::NonNullList(item_ty) => {
                if let JsonValue::Array(items) = value {
                    JsonValue::Array(
                        items
                            .iter()
                            .enumerate()
                            .map(|(index, item)| {
                                let item_path = nested(path, PathSegment::Index(index));
                                self.coerce(item, item_ty, Some(&item_path))
                            })
                            .collect(),
                    )
                } else {
                    // A single value is coerced to a list of one item
                    JsonValue::Array(vec![self.coerce(value, item_ty, path)])
                }
            }
            Type::Named(name) | Type::NonNullNamed(name) => {
                let Some(definition) = self.schema.types.get(name) else {
                    return self.error(format!("Unknown type \"{name}\"{}.", At(path)));
                };
                match definition {
                    ExtendedType::Scalar(_) => self.coerce_scalar(value, name.as_str(), path),
                    ExtendedType::Enum(definition) => self.coerce_enum(value, definition, path),
                    ExtendedType::InputObject(definition) => {
                        self.coerce_input_object(value, definition, path)
                    }
                    ExtendedType::Object(_)
                    | ExtendedType::Interface(_)
                    | ExtendedType::Union(_) => self.error(format!(
                        "Expected an input type, found \"{name}\"{}.",
                        At(path)
                    )),
                }
            }
        }
    }

    fn coerce_scalar(
        &mut self,
        value: &JsonValue,
        name: &str,
        path: Option<&InputPath<'_>>,
    ) -> JsonValue {
        let invalid = match name {
            // https://spec.graphql.org/October2021/#sec-Int.Input-Coercion
            "Int" => match value.as_i64() {
                Some(int) if i32::try_from(int).is_ok() => return value.clone(),
                Some(_) => format!("Int cannot represent non 32-bit signed integer value: {value}"),
                None if value.is_u64() => {
                    format!("Int cannot represent non 32-bit signed integer value: {value}")
                }
                None => format!("Int cannot represent non-integer value: {value}"),
            },
            // https://spec.graphql.org/October2021/#sec-Float.Input-Coercion
            "Float" => match value.as_f64() {
                Some(float) if float.is_finite() => return JsonValue::from(float),
                _ => format!("Float cannot represent non numeric value: {value}"),
            },
            // https://spec.graphql.org/October2021/#sec-String.Input-Coercion
            "String" => {
                if value.is_string() {
                    return value.clone();
                }
                format!("String cannot represent a non string value: {value}")
            }
            // https://spec.graphql.org/October2021/#sec-Boolean.Input-Coercion
            "Boolean" => {
                if value.is_boolean() {
                    return value.clone();
                }
                format!("Boolean cannot represent a non boolean value: {value}")
            }
            // https://spec.graphql.org/October2021/#sec-ID.Input-Coercion
            // Integers are accepted and produced in their string form
            "ID" => match value {
                JsonValue::String(_) => return value.clone(),
                JsonValue::Number(number) if number.is_i64() || number.is_u64() => {
                    return JsonValue::from(number.to_string());
                }
                _ => format!("ID cannot represent value: {value}"),
            },
            // Custom scalar: accept any JSON value
            _ => return value.clone(),
        };
        self.error(format!("Expected type \"{name}\"{}; {invalid}", At(path)))
    }

    fn coerce_enum(
        &mut self,
        value: &JsonValue,
        definition: &EnumType,
        path: Option<&InputPath<'_>>,
    ) -> JsonValue {
        let name = &definition.name;
        match value.as_str() {
            Some(str) if definition.values.contains_key(str) => value.clone(),
            Some(str) => self.error(format!(
                "Expected type \"{name}\"{}; value \"{str}\" does not exist in \"{name}\" enum.",
                At(path)
            )),
            None => self.error(format!(
                "Expected type \"{name}\"{}; enum values must be strings, found {value}.",
                At(path)
            )),
        }
    }

    fn coerce_input_object(
        &mut self,
        value: &JsonValue,
        definition: &InputObjectType,
        path: Option<&InputPath<'_>>,
    ) -> JsonValue {
        let name = &definition.name;
        let Some(object) = value.as_object() else {
            return self.error(format!(
                "Expected type \"{name}\"{} to be an object.",
                At(path)
            ));
        };
        let mut coerced = JsonMap::new();
        for (field_name, field_definition) in &definition.fields {
            let field_path = nested(path, PathSegment::Field(field_name.as_str()));
            if let Some(field_value) = object.get(field_name.as_str()) {
                let field_value = self.coerce(field_value, &field_definition.ty, Some(&field_path));
                coerced.insert(field_name.as_str(), field_value);
            } else if let Some(default_value) = &field_definition.default_value {
                match coerce_literal(self.schema, default_value, &field_definition.ty, None) {
                    Some(default_value) => {
                        coerced.insert(field_name.as_str(), default_value);
                    }
                    None => {
                        self.error(format!(
                            "Field \"{field_path}\" has invalid default value {default_value}."
                        ));
                    }
                }
            } else if field_definition.ty.is_non_null() {
                self.error(format!(
                    "Field \"{field_path}\" of required type \"{}\" was not provided.",
                    field_definition.ty
                ));
            }
        }
        for key in object.keys() {
            if !definition.fields.contains_key(key.as_str()) {
                self.error(format!(
                    "Field \"{}\" is not defined by type \"{name}\"{}.",
                    key.as_str(),
                    At(path)
                ));
            }
        }
        JsonValue::Object(coerced)
    }
}

/// <https://spec.graphql.org/October2021/#sec-Coercing-Field-Arguments> applied to a literal
fn coerce_literal(
    schema: &Schema,
    value: &ast::Value,
    ty: &Type,
    variables: Option<&CoercedValues>,
) -> Option<JsonValue> {
    if let ast::Value::Variable(variable_name) = value {
        // Not provided at runtime: invalid here, callers decide about defaults
        let variable_value = variables?.get(variable_name.as_str())?;
        if variable_value.is_null() && ty.is_non_null() {
            return None;
        }
        // Variable usages were checked to be compatible with this position by validation
        return Some(variable_value.clone());
    }
    if value.is_null() {
        return (!ty.is_non_null()).then_some(JsonValue::Null);
    }
    match ty {
        Type::List(item_ty) | Type::NonNullList(item_ty) => {
            if let ast::Value::List(items) = value {
                items
                    .iter()
                    .map(|item| {
                        if is_missing_variable(item, variables) {
                            // An unprovided variable in a list becomes null, if allowed
                            (!item_ty.is_non_null()).then_some(JsonValue::Null)
                        } else {
                            coerce_literal(schema, item, item_ty, variables)
                        }
                    })
                    .collect::<Option<Vec<_>>>()
                    .map(JsonValue::Array)
            } else {
                let item = coerce_literal(schema, value, item_ty, variables)?;
                Some(JsonValue::Array(vec![item]))
            }
        }
        Type::Named(name) | Type::NonNullNamed(name) => match schema.types.get(name)? {
            ExtendedType::InputObject(definition) => {
                let ast::Value::Object(fields) = value else {
                    return None;
                };
                let mut coerced = JsonMap::new();
                for (field_name, field_definition) in &definition.fields {
                    let field_value = fields
                        .iter()
                        .find(|(name, _)| name == field_name)
                        .map(|(_, value)| value)
                        .filter(|value| !is_missing_variable(value, variables));
                    if let Some(field_value) = field_value {
                        let field_value =
                            coerce_literal(schema, field_value, &field_definition.ty, variables)?;
                        coerced.insert(field_name.as_str(), field_value);
                    } else if let Some(default_value) = &field_definition.default_value {
                        let default_value =
                            coerce_literal(schema, default_value, &field_definition.ty, None)?;
                        coerced.insert(field_name.as_str(), default_value);
                    } else if field_definition.ty.is_non_null() {
                        return None;
                    }
                }
                Some(JsonValue::Object(coerced))
            }
            ExtendedType::Enum(definition) => match value {
                ast::Value::Enum(value) if definition.values.contains_key(value) => {
                    Some(value.as_str().into())
                }
                _ => None,
            },
            ExtendedType::Scalar(_) => coerce_scalar_literal(name.as_str(), value, variables),
            ExtendedType::Object(_) | ExtendedType::Interface(_) | ExtendedType::Union(_) => None,
        },
    }
}

fn coerce_scalar_literal(
    name: &str,
    value: &ast::Value,
    variables: Option<&CoercedValues>,
) -> Option<JsonValue> {
    match (name, value) {
        ("Int", ast::Value::Int(int)) => int.try_to_i32().ok().map(JsonValue::from),
        ("Float", ast::Value::Int(int)) => int.try_to_f64().ok().map(JsonValue::from),
        ("Float", ast::Value::Float(float)) => float.try_to_f64().ok().map(JsonValue::from),
        ("String", ast::Value::String(str)) => Some(str.as_str().into()),
        ("Boolean", ast::Value::Boolean(bool)) => Some((*bool).into()),
        ("ID", ast::Value::String(str)) => Some(str.as_str().into()),
        ("ID", ast::Value::Int(int)) => Some(int.as_str().into()),
        ("Int" | "Float" | "String" | "Boolean" | "ID", _) => None,
        // Custom scalar: any literal, converted structurally
        _ => literal_to_json(value, variables),
    }
}

/// Converts a literal to JSON without a type to check against.
///
/// Unprovided variables nested in the literal are left out of objects and are null in lists.
fn literal_to_json(value: &ast::Value, variables: Option<&CoercedValues>) -> Option<JsonValue> {
    Some(match value {
        ast::Value::Null => JsonValue::Null,
        ast::Value::Variable(name) => variables?.get(name.as_str())?.clone(),
        ast::Value::Enum(name) => name.as_str().into(),
        ast::Value::String(str) => str.as_str().into(),
        ast::Value::Boolean(bool) => (*bool).into(),
        ast::Value::Int(int) => match int.as_str().parse::<i64>() {
            Ok(int) => int.into(),
            Err(_) => int.try_to_f64().ok()?.into(),
        },
        ast::Value::Float(float) => float.try_to_f64().ok()?.into(),
        ast::Value::List(items) => JsonValue::Array(
            items
                .iter()
                .map(|item| {
                    if is_missing_variable(item, variables) {
                        Some(JsonValue::Null)
                    } else {
                        literal_to_json(item, variables)
                    }
                })
                .collect::<Option<_>>()?,
        ),
        ast::Value::Object(fields) => {
            let mut object = JsonMap::new();
            for (name, value) in fields {
                if is_missing_variable(value, variables) {
                    continue;
                }
                object.insert(name.as_str(), literal_to_json(value, variables)?);
            }
            JsonValue::Object(object)
        }
    })
}

fn is_missing_variable(value: &ast::Value, variables: Option<&CoercedValues>) -> bool {
    match value {
        ast::Value::Variable(name) => {
            variables.is_none_or(|variables| !variables.contains_key(name.as_str()))
        }
        _ => false,
    }
}

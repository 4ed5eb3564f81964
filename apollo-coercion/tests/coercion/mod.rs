use apollo_compiler::ExecutableDocument;
use apollo_compiler::Node;
use apollo_compiler::Schema;
use apollo_compiler::ast;
use apollo_compiler::executable;
use apollo_compiler::response::JsonMap;
use apollo_compiler::response::JsonValue;
use apollo_compiler::validation::Valid;

mod arguments;
mod directives;

const SCHEMA: &str = r#"
type Query {
  greet(name: String!): String
  user(name: String!, limit: Int = 10, filter: Filter): User
  search(term: String!, first: Int!): [String]
}

type User {
  name: String
}

input Filter {
  active: Boolean = true
  tags: [String!]
}

directive @log(level: Int = 1, tag: String) on FIELD
"#;

fn schema() -> Valid<Schema> {
    Schema::parse_and_validate(SCHEMA, "schema.graphql").unwrap()
}

fn document(schema: &Valid<Schema>, query: &str) -> Valid<ExecutableDocument> {
    ExecutableDocument::parse_and_validate(schema, query, "query.graphql").unwrap()
}

/// The first root field of the anonymous operation
fn root_field(document: &ExecutableDocument) -> &Node<executable::Field> {
    let operation = document.operations.get(None).unwrap();
    let executable::Selection::Field(field) = &operation.selection_set.selections[0] else {
        panic!("expected a field")
    };
    field
}

/// The first root field of an operation that did not go through validation
fn unvalidated_root_field(query: &str) -> Node<ast::Field> {
    let doc = ast::Document::parse(query, "query.graphql").unwrap();
    let ast::Definition::OperationDefinition(operation) = &doc.definitions[0] else {
        panic!("expected an operation")
    };
    let ast::Selection::Field(field) = &operation.selection_set[0] else {
        panic!("expected a field")
    };
    field.clone()
}

fn inputs(value: JsonValue) -> JsonMap {
    let JsonValue::Object(inputs) = value else {
        unreachable!("variables must be an object")
    };
    inputs
}

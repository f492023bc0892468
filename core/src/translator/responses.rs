#![deny(missing_docs)]

//! # Response Translation
//!
//! Maps one described response to a record with two properties:
//!
//! - `headers`: a `Headers` record with one property per declared header,
//!   optional when the header is not required. When every header is optional
//!   the property defaults to `.init()`.
//! - `body`: a frozen `Body` enum with one case per content entry, in document
//!   order. A response without content still declares the enum, with no
//!   cases, and the property becomes optional with a `nil` default.

use openapiv3::{ParameterSchemaOrContent, ReferenceOr, Response};
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::ir::{Comment, Declaration, EnumCaseDescription, EnumDescription};
use crate::naming::{property_identifier, swift_safe_name};
use crate::oas::ref_utils::encode_pointer_segment;
use crate::oas::SchemaNode;
use crate::translator::blueprints::{PropertyBlueprint, PropertyDefault, StructBlueprint};
use crate::translator::schemas::IdentifierScope;
use crate::translator::type_name::TypeName;
use crate::translator::type_resolver::TypeResolver;
use crate::translator::type_usage::TypeUsage;

const RESPONSE_CONFORMANCES: &[&str] = &["Sendable", "Hashable"];

fn conformances() -> Vec<String> {
    RESPONSE_CONFORMANCES.iter().map(|c| c.to_string()).collect()
}

fn remark(type_name: &TypeName) -> Option<String> {
    type_name
        .full_json_path()
        .map(|path| format!("- Remark: Generated from `{path}`."))
}

/// Translates responses into record declarations.
#[derive(Debug, Clone, Copy)]
pub struct ResponseTranslator<'a> {
    resolver: TypeResolver<'a>,
}

impl<'a> ResponseTranslator<'a> {
    /// A translator resolving payload and header types with `resolver`.
    pub fn new(resolver: TypeResolver<'a>) -> Self {
        Self { resolver }
    }

    /// Translates a response component into `Components.Responses.<name>`.
    /// `$ref` responses are followed first.
    pub fn translate_response_component(
        &self,
        name: &str,
        response: &ReferenceOr<Response>,
    ) -> AppResult<Declaration> {
        let type_name = TypeName::responses().appending(
            swift_safe_name(name),
            Some(&encode_pointer_segment(name)),
        );
        let result = self
            .resolver
            .document()
            .resolve_response(response)
            .map_err(AppError::from)
            .and_then(|response| self.translate(response, &type_name));
        result.map_err(|error| match error {
            AppError::Resolution(inner) if inner.component.is_none() => {
                AppError::Resolution(inner.in_component(name))
            }
            other => other,
        })
    }

    /// Translates `response` into a record named `type_name`.
    pub fn translate(&self, response: &Response, type_name: &TypeName) -> AppResult<Declaration> {
        let access = self.resolver.config().access_modifier;

        let headers_type = type_name.appending("Headers", Some("headers"));
        let headers = self.header_properties(response, &headers_type)?;
        let header_count = headers.len();
        let headers_blueprint = StructBlueprint {
            comment: remark(&headers_type).map(Comment::Doc),
            access,
            type_name: headers_type.clone(),
            conformances: conformances(),
            coding_keys: false,
            properties: headers,
        };
        let headers_empty_init = headers_blueprint.has_empty_init();
        let mut headers_property =
            PropertyBlueprint::new("headers", "headers", headers_type.clone().into());
        headers_property.comment = Some(Comment::Doc("Received HTTP response headers".into()));
        if headers_empty_init {
            headers_property.default = Some(PropertyDefault::EmptyInit);
        }
        headers_property
            .associated_declarations
            .push(headers_blueprint.into_declaration());

        let body_type = type_name.appending("Body", Some("content"));
        let contents = self.resolver.typed_contents(&response.content, &body_type)?;
        let case_count = contents.len();
        let mut body_members = Vec::new();
        for content in contents {
            body_members.extend(content.declaration);
            let case = Declaration::EnumCase(EnumCaseDescription::with_payload(
                content.case_name,
                content.usage.to_existing_type(),
            ));
            let case_path = body_type
                .full_json_path()
                .map(|path| format!("{path}/{}", encode_pointer_segment(content.media_type)));
            body_members.push(match case_path {
                Some(path) => case.with_doc(format!("- Remark: Generated from `{path}`.")),
                None => case,
            });
        }
        let body_enum = Declaration::Enum(EnumDescription {
            is_frozen: true,
            is_indirect: false,
            access: Some(access),
            name: body_type.short_swift_name().to_string(),
            conformances: conformances(),
            members: body_members,
        })
        .commented(remark(&body_type).map(Comment::Doc));
        let mut body_property = PropertyBlueprint::new(
            "body",
            "body",
            TypeUsage::from(body_type).with_optional(case_count == 0),
        );
        body_property.comment = Some(Comment::Doc("Received HTTP response body".into()));
        if case_count == 0 {
            body_property.default = Some(PropertyDefault::Nil);
        }
        body_property.associated_declarations.push(body_enum);

        debug!(
            type_name = %type_name,
            headers = header_count,
            cases = case_count,
            "translated response"
        );

        let comment = match (response.description.trim(), remark(type_name)) {
            ("", Some(remark)) => Some(Comment::Doc(remark)),
            ("", None) => None,
            (description, Some(remark)) => Some(Comment::Doc(format!("{description}\n\n{remark}"))),
            (description, None) => Some(Comment::Doc(description.to_string())),
        };
        Ok(StructBlueprint {
            comment,
            access,
            type_name: type_name.clone(),
            conformances: conformances(),
            coding_keys: false,
            properties: vec![headers_property, body_property],
        }
        .into_declaration())
    }

    fn header_properties(
        &self,
        response: &Response,
        headers_type: &TypeName,
    ) -> AppResult<Vec<PropertyBlueprint>> {
        let document = self.resolver.document();
        let mut scope = IdentifierScope::new(headers_type);
        let mut properties = Vec::with_capacity(response.headers.len());
        for (name, header) in &response.headers {
            let header = document.resolve_header(header)?;
            let identifier = property_identifier(name);
            scope.claim(&identifier, name)?;
            let schema = match &header.format {
                ParameterSchemaOrContent::Schema(schema) => Some(SchemaNode::from(schema)),
                ParameterSchemaOrContent::Content(content) => content
                    .values()
                    .next()
                    .and_then(|media| media.schema.as_ref())
                    .map(SchemaNode::from),
            };
            let resolved = self
                .resolver
                .resolve_optional(schema, headers_type, &identifier)?;
            let mut property = PropertyBlueprint::new(
                name.clone(),
                identifier,
                resolved.usage.with_optional(!header.required),
            );
            property.comment = header
                .description
                .as_deref()
                .map(str::trim_end)
                .filter(|text| !text.is_empty())
                .map(|text| Comment::Doc(text.to_string()));
            property.associated_declarations.extend(resolved.declaration);
            properties.push(property);
        }
        Ok(properties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::oas::Document;
    use crate::renderer::TextRenderer;
    use crate::translator::registry::ComponentRegistry;
    use pretty_assertions::assert_eq;

    fn translate(yaml_responses: &str, name: &str) -> AppResult<String> {
        let yaml = format!(
            "openapi: 3.0.3\ninfo:\n  title: t\n  version: '1'\npaths: {{}}\ncomponents:\n  responses:\n{yaml_responses}"
        );
        let doc = Document::from_yaml_str(&yaml)?;
        let registry = ComponentRegistry::new();
        let config = GeneratorConfig::default();
        let translator = ResponseTranslator::new(TypeResolver::new(&doc, &registry, &config));
        let response = doc
            .response_component(name)
            .ok_or_else(|| AppError::Document(format!("no response {name}")))?;
        let declaration = translator.translate_response_component(name, response)?;
        Ok(TextRenderer::default().render(&declaration)?)
    }

    #[test]
    fn test_response_without_content() {
        let text = translate("    NoContent:\n      description: Nothing here.\n", "NoContent").unwrap();
        assert_eq!(
            text,
            r#"/// Nothing here.
///
/// - Remark: Generated from `#/components/responses/NoContent`.
public struct NoContent: Sendable, Hashable {
    /// - Remark: Generated from `#/components/responses/NoContent/headers`.
    public struct Headers: Sendable, Hashable {
        /// Creates a new `Headers`.
        public init() {}
    }
    /// Received HTTP response headers
    public var headers: Components.Responses.NoContent.Headers
    /// - Remark: Generated from `#/components/responses/NoContent/content`.
    @frozen public enum Body: Sendable, Hashable {}
    /// Received HTTP response body
    public var body: Components.Responses.NoContent.Body?
    /// Creates a new `NoContent`.
    ///
    /// - Parameters:
    ///   - headers: Received HTTP response headers
    ///   - body: Received HTTP response body
    public init(
        headers: Components.Responses.NoContent.Headers = .init(),
        body: Components.Responses.NoContent.Body? = nil
    ) {
        self.headers = headers
        self.body = body
    }
}"#
        );
    }

    #[test]
    fn test_headers_and_inline_json_payload() {
        let text = translate(
            r#"    Ok:
      description: ''
      headers:
        X-Rate-Limit:
          required: true
          description: Calls left.
          schema:
            type: integer
        X-Trace:
          schema:
            type: string
      content:
        application/json:
          schema:
            type: object
            properties:
              id:
                type: string
        application/octet-stream: {}
"#,
            "Ok",
        )
        .unwrap();
        assert!(text.contains(
            "        /// Calls left.\n        public var xRateLimit: Swift.Int\n        public var xTrace: Swift.String?\n"
        ));
        assert!(text.contains("        public struct jsonPayload: Codable, Hashable, Sendable {\n"));
        assert!(text.contains(
            "        /// - Remark: Generated from `#/components/responses/Ok/content/application~1json`.\n        case json(Components.Responses.Ok.Body.jsonPayload)\n"
        ));
        assert!(text.contains("        case binary(OpenAPIRuntime.HTTPBody)\n"));
        assert!(text.contains("    public var body: Components.Responses.Ok.Body\n"));
        assert!(text.contains("        headers: Components.Responses.Ok.Headers,\n"));
    }

    #[test]
    fn test_colliding_headers() {
        let err = translate(
            "    Clash:\n      description: x\n      headers:\n        X-Rate-Limit:\n          schema:\n            type: integer\n        x-rate-limit:\n          schema:\n            type: integer\n",
            "Clash",
        )
        .unwrap_err();
        assert!(matches!(err, AppError::NamingCollision(ref e) if e.identifier == "xRateLimit"));
    }

    #[test]
    fn test_colliding_content_cases() {
        let err = translate(
            "    Dup:\n      description: x\n      content:\n        application/json: {}\n        application/json; charset=utf-8: {}\n",
            "Dup",
        )
        .unwrap_err();
        assert!(matches!(err, AppError::NamingCollision(ref e) if e.identifier == "json"));
    }

    #[test]
    fn test_sibling_responses_share_component_failure() {
        let yaml = "openapi: 3.0.3\ninfo:\n  title: t\n  version: '1'\npaths: {}\ncomponents:\n  schemas:\n    Pet:\n      type: object\n      properties:\n        X-Id:\n          type: string\n        x_id:\n          type: string\n  responses:\n    A:\n      description: a\n      content:\n        application/json:\n          schema:\n            $ref: '#/components/schemas/Pet'\n    B:\n      description: b\n      content:\n        application/json:\n          schema:\n            $ref: '#/components/schemas/Pet'\n";
        let doc = Document::from_yaml_str(yaml).unwrap();
        let registry = ComponentRegistry::new();
        let config = GeneratorConfig::default();
        let translator = ResponseTranslator::new(TypeResolver::new(&doc, &registry, &config));
        for name in ["A", "B"] {
            let response = doc.response_component(name).unwrap();
            let err = translator
                .translate_response_component(name, response)
                .unwrap_err();
            assert!(
                matches!(err, AppError::NamingCollision(ref e) if e.identifier == "xId"),
                "{name}: {err}"
            );
        }
        assert_eq!(registry.declaration_count(), 0);
    }

    #[test]
    fn test_block_scalar_header_description_is_trimmed() {
        let text = translate(
            "    Ok:\n      description: x\n      headers:\n        X-Trace:\n          description: |\n            Trace id.\n          schema:\n            type: string\n",
            "Ok",
        )
        .unwrap();
        assert!(text.contains("        /// Trace id.\n        public var xTrace: Swift.String?\n"));
    }

    #[test]
    fn test_unresolvable_payload_names_component() {
        let err = translate(
            "    Bad:\n      description: x\n      content:\n        application/json:\n          schema:\n            not:\n              type: string\n",
            "Bad",
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Resolution(ref e) if e.component.as_deref() == Some("Bad")));
    }
}

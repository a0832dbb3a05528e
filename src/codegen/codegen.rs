//! Output buffer and top-level class emission.

use crate::{ast::types::Type, type_checker::typed_ast::CheckedProgram};

use super::stmt::gen_block;

/// Accumulates the generated class body plus the imports discovered along
/// the way. Imports are appended at most once, in first-use order, and
/// prepended to the body when generation finishes.
pub struct Generator {
    out: String,
    imports: Vec<&'static str>,
    depth: usize,
    return_type: Type,
}

impl Generator {
    fn new(return_type: Type) -> Self {
        Generator {
            out: String::new(),
            imports: vec![],
            depth: 0,
            return_type,
        }
    }

    pub(super) fn import(&mut self, class: &'static str) {
        if !self.imports.contains(&class) {
            self.imports.push(class);
        }
    }

    pub(super) fn return_type(&self) -> Type {
        self.return_type
    }

    /// The Java spelling of a type. Pixels are packed ARGB words, so both
    /// `int` and `pixel` map to Java `int`.
    pub(super) fn java_type(&mut self, ty: Type) -> &'static str {
        match ty {
            Type::Int | Type::Pixel => "int",
            Type::String => "String",
            Type::Image => {
                self.import("java.awt.image.BufferedImage");
                "BufferedImage"
            }
            Type::Void => "void",
        }
    }

    pub(super) fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str("    ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    pub(super) fn indent(&mut self) {
        self.depth += 1;
    }

    pub(super) fn dedent(&mut self) {
        self.depth -= 1;
    }

    fn finish(self) -> String {
        if self.imports.is_empty() {
            return self.out;
        }
        let mut result = String::with_capacity(self.out.len() + 64);
        for import in &self.imports {
            result.push_str("import ");
            result.push_str(import);
            result.push_str(";\n");
        }
        result.push('\n');
        result.push_str(&self.out);
        result
    }
}

/// Emits the Java translation unit for one checked program: a class named
/// after the program with a single static `apply` method.
pub fn generate(program: &CheckedProgram) -> String {
    let mut gen = Generator::new(program.return_type);

    let mut params = Vec::with_capacity(program.params.len());
    for param in &program.params {
        let jtype = gen.java_type(param.ty);
        params.push(format!("{jtype} {}", param.java_name));
    }
    let return_type = gen.java_type(program.return_type);

    gen.line(&format!("public class {} {{", program.name));
    gen.indent();
    gen.line(&format!(
        "public static {return_type} apply({}) {{",
        params.join(", ")
    ));
    gen.indent();
    gen_block(&mut gen, &program.block);
    gen.dedent();
    gen.line("}");
    gen.dedent();
    gen.line("}");

    gen.finish()
}

//! Declaration and statement lowering.

use crate::{
    ast::types::Type,
    type_checker::typed_ast::{
        TypedBlock, TypedDeclaration, TypedExpr, TypedLValue, TypedStatement,
    },
};

use super::{
    codegen::Generator,
    expr::{channel_suffix, gen_expr},
};

pub(super) fn gen_block(gen: &mut Generator, block: &TypedBlock) {
    for declaration in &block.declarations {
        gen_declaration(gen, declaration);
    }
    for statement in &block.statements {
        gen_statement(gen, statement);
    }
}

fn gen_declaration(gen: &mut Generator, declaration: &TypedDeclaration) {
    let name_def = &declaration.name_def;
    let jtype = gen.java_type(name_def.ty);
    let name = name_def.java_name.clone();

    if name_def.ty == Type::Image {
        let rhs = gen_image_initializer(gen, declaration);
        gen.line(&format!("{jtype} {name} = {rhs};"));
        return;
    }

    match &declaration.initializer {
        Some(init) => {
            let value = converted(gen, name_def.ty, init);
            gen.line(&format!("{jtype} {name} = {value};"));
        }
        None => gen.line(&format!("{jtype} {name};")),
    }
}

/// An image declaration always produces a value: an allocation from the
/// dimension, a load, a clone/resize, or an allocate-then-fill.
fn gen_image_initializer(gen: &mut Generator, declaration: &TypedDeclaration) -> String {
    let dimension = declaration.name_def.dimension.as_ref().map(|dimension| {
        let width = gen_expr(gen, &dimension.width);
        let height = gen_expr(gen, &dimension.height);
        (width, height)
    });

    match &declaration.initializer {
        None => {
            // The checker guarantees a dimension when there is no initializer.
            gen.import("runtime.ImageOps");
            let (width, height) = dimension.unwrap();
            format!("ImageOps.makeImage({width}, {height})")
        }
        Some(init) => {
            let value = gen_expr(gen, init);
            match (init.ty, dimension) {
                (Type::String, Some((width, height))) => {
                    gen.import("runtime.FileURLIO");
                    format!("FileURLIO.readImage({value}, {width}, {height})")
                }
                (Type::String, None) => {
                    gen.import("runtime.FileURLIO");
                    format!("FileURLIO.readImage({value})")
                }
                (Type::Image, Some((width, height))) => {
                    gen.import("runtime.ImageOps");
                    format!("ImageOps.copyAndResize({value}, {width}, {height})")
                }
                (Type::Image, None) => {
                    gen.import("runtime.ImageOps");
                    format!("ImageOps.cloneImage({value})")
                }
                (Type::Pixel, dimension) => {
                    // A pixel initializer only fills, so the checker required
                    // the dimension.
                    gen.import("runtime.ImageOps");
                    let (width, height) = dimension.unwrap();
                    format!("ImageOps.setAllPixels(ImageOps.makeImage({width}, {height}), {value})")
                }
                _ => unreachable!("checker admits no other image initializer type"),
            }
        }
    }
}

fn gen_statement(gen: &mut Generator, statement: &TypedStatement) {
    match statement {
        TypedStatement::Assign { lvalue, value } => gen_assignment(gen, lvalue, value),
        TypedStatement::Write { value } => {
            gen.import("runtime.ConsoleIO");
            let value = gen_expr(gen, value);
            gen.line(&format!("ConsoleIO.write({value});"));
        }
        TypedStatement::While { guard, body } => {
            let guard = gen_expr(gen, guard);
            gen.line(&format!("while ({guard} != 0) {{"));
            gen.indent();
            gen_block(gen, body);
            gen.dedent();
            gen.line("}");
        }
        TypedStatement::Return { value } => {
            let target = gen.return_type();
            let value = converted(gen, target, value);
            gen.line(&format!("return {value};"));
        }
    }
}

fn gen_assignment(gen: &mut Generator, lvalue: &TypedLValue, value: &TypedExpr) {
    let name = lvalue.java_name.clone();
    match (lvalue.declared, &lvalue.pixel, lvalue.channel) {
        (Type::Image, None, None) => {
            gen.import("runtime.ImageOps");
            let rhs = gen_expr(gen, value);
            match value.ty {
                Type::String => {
                    gen.import("runtime.FileURLIO");
                    gen.line(&format!(
                        "ImageOps.copyInto(FileURLIO.readImage({rhs}), {name});"
                    ));
                }
                Type::Image => gen.line(&format!("ImageOps.copyInto({rhs}, {name});")),
                Type::Pixel => gen.line(&format!("ImageOps.setAllPixels({name}, {rhs});")),
                _ => unreachable!("checker admits no other image assignment source"),
            }
        }
        (Type::Image, None, Some(channel)) => {
            // Whole-channel overwrite: replace the image with the channel
            // extraction of the right-hand image.
            gen.import("runtime.ImageOps");
            let rhs = gen_expr(gen, value);
            gen.line(&format!(
                "ImageOps.copyInto(ImageOps.extract{}({rhs}), {name});",
                channel_suffix(channel)
            ));
        }
        (Type::Image, Some((x, y)), channel) => {
            gen.import("runtime.ImageOps");
            let rhs = gen_expr(gen, value);
            let write = match channel {
                None => format!("ImageOps.setRGB({name}, {x}, {y}, {rhs});"),
                Some(channel) => {
                    gen.import("runtime.PixelOps");
                    format!(
                        "ImageOps.setRGB({name}, {x}, {y}, PixelOps.set{}(ImageOps.getRGB({name}, {x}, {y}), {rhs}));",
                        channel_suffix(channel)
                    )
                }
            };
            gen.line(&format!("for (int {x} = 0; {x} < {name}.getWidth(); {x}++) {{"));
            gen.indent();
            gen.line(&format!(
                "for (int {y} = 0; {y} < {name}.getHeight(); {y}++) {{"
            ));
            gen.indent();
            gen.line(&write);
            gen.dedent();
            gen.line("}");
            gen.dedent();
            gen.line("}");
        }
        (Type::Pixel, None, Some(channel)) => {
            gen.import("runtime.PixelOps");
            let rhs = gen_expr(gen, value);
            gen.line(&format!(
                "{name} = PixelOps.set{}({name}, {rhs});",
                channel_suffix(channel)
            ));
        }
        (_, None, None) => {
            let rhs = converted(gen, lvalue.ty, value);
            gen.line(&format!("{name} = {rhs};"));
        }
        _ => unreachable!("checker admits no other lvalue shape"),
    }
}

/// Bridges the assignment-compatibility gaps that need an explicit call in
/// Java: stringification into string targets and image loading from string
/// sources. Pixel/int cross-assignment is the identity, both are Java ints.
fn converted(gen: &mut Generator, target: Type, value: &TypedExpr) -> String {
    let code = gen_expr(gen, value);
    match (target, value.ty) {
        (Type::String, Type::Int | Type::Pixel | Type::Image) => {
            format!("String.valueOf({code})")
        }
        (Type::Image, Type::String) => {
            gen.import("runtime.FileURLIO");
            format!("FileURLIO.readImage({code})")
        }
        (Type::Image, Type::Pixel) => {
            // Only reachable from a return statement, where no target image
            // exists to size the fill.
            gen.import("runtime.ImageOps");
            format!("ImageOps.setAllPixels(ImageOps.makeImage(1, 1), {code})")
        }
        _ => code,
    }
}

//! Java code generation.
//!
//! Consumes a [`CheckedProgram`](crate::type_checker::typed_ast) and emits
//! one Java class whose single `public static apply` method implements the
//! program. Generated code calls an external runtime library by a fixed
//! naming convention so generated programs and the library evolve
//! independently:
//!
//! - `runtime.ConsoleIO.write(v)` - console output, overloaded per type.
//! - `runtime.FileURLIO.readImage(url[, w, h])` - image loading.
//! - `runtime.ImageOps` - `makeImage`, `cloneImage`, `copyAndResize`,
//!   `copyInto`, `setAllPixels` (returns its image argument), `getRGB`,
//!   `setRGB`, `extractRed/Grn/Blu`, `equals`, and the element-wise
//!   `binaryImageImageOp`, `binaryImageScalarOp`, `binaryImagePixelOp`,
//!   `binaryPackedPixelPixelOp`, `binaryPackedPixelScalarOp`, each tagged
//!   with an `ImageOps.OP` value (`PLUS`, `MINUS`, `TIMES`, `DIV`, `MOD`,
//!   `EXP`, `BITAND`, `BITOR`).
//! - `runtime.PixelOps` - `pack`, `red/grn/blu`, `setRed/setGrn/setBlu`,
//!   `complement` over packed ARGB ints.

pub mod codegen;
mod expr;
mod stmt;

use tract_tensorflow::tract_core::internal::*;
use tract_tensorflow::tract_core::ndarray::{Array4, Ix4};

/// Bilinear resize of the two spatial axes of a NHWC f32 tensor.
///
/// Sampling follows TensorFlow's `ResizeBilinear` with both `align_corners`
/// and `half_pixel_centers` off: output pixel `o` reads input coordinate
/// `o * in / out`, blending the two neighbouring rows (and columns) by the
/// fractional part. Aspect ratio is not preserved.
#[derive(Debug, Clone, new, Hash, PartialEq, Eq)]
pub struct ResizeBilinear {
    pub height: usize,
    pub width: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Interpolation {
    lower: usize,
    upper: usize,
    lerp: f32,
}

fn interpolations(input: usize, output: usize) -> Vec<Interpolation> {
    let scale = input as f32 / output as f32;
    (0..output)
        .map(|o| {
            let src = o as f32 * scale;
            let floor = src.floor();
            let lower = (floor as usize).min(input - 1);
            Interpolation { lower, upper: (lower + 1).min(input - 1), lerp: src - floor }
        })
        .collect()
}

impl ResizeBilinear {
    fn resize(&self, input: &Tensor) -> TractResult<Tensor> {
        let input = input.to_array_view::<f32>()?.into_dimensionality::<Ix4>()?;
        let (batch, in_height, in_width, channels) = input.dim();
        anyhow::ensure!(
            in_height > 0 && in_width > 0,
            "Can not resize an empty {}x{} image",
            in_height,
            in_width
        );
        let ys = interpolations(in_height, self.height);
        let xs = interpolations(in_width, self.width);
        let shape = (batch, self.height, self.width, channels);
        let output = Array4::from_shape_fn(shape, |(n, y, x, c)| {
            let (y, x) = (ys[y], xs[x]);
            let top_left = input[(n, y.lower, x.lower, c)];
            let top_right = input[(n, y.lower, x.upper, c)];
            let bottom_left = input[(n, y.upper, x.lower, c)];
            let bottom_right = input[(n, y.upper, x.upper, c)];
            let top = top_left + (top_right - top_left) * x.lerp;
            let bottom = bottom_left + (bottom_right - bottom_left) * x.lerp;
            top + (bottom - top) * y.lerp
        });
        Ok(output.into())
    }
}

impl Op for ResizeBilinear {
    fn name(&self) -> Cow<'static, str> {
        "ResizeBilinear".into()
    }

    op_as_typed_op!();
}

impl EvalOp for ResizeBilinear {
    fn is_stateless(&self) -> bool {
        true
    }

    fn eval(&self, inputs: TVec<TValue>) -> TractResult<TVec<TValue>> {
        let input = args_1!(inputs);
        Ok(tvec!(self.resize(&input)?.into_tvalue()))
    }
}

impl TypedOp for ResizeBilinear {
    fn output_facts(&self, inputs: &[&TypedFact]) -> TractResult<TVec<TypedFact>> {
        let input = inputs[0];
        anyhow::ensure!(input.rank() == 4, "ResizeBilinear expects a NHWC input, got {:?}", input);
        anyhow::ensure!(
            input.datum_type == f32::datum_type(),
            "ResizeBilinear expects f32, got {:?}",
            input.datum_type
        );
        anyhow::ensure!(
            self.height > 0 && self.width > 0,
            "ResizeBilinear target must be positive, got {}x{}",
            self.height,
            self.width
        );
        let mut shape = input.shape.to_tvec();
        shape[1] = self.height.to_dim();
        shape[2] = self.width.to_dim();
        Ok(tvec!(f32::fact(shape)))
    }

    as_op!();
}

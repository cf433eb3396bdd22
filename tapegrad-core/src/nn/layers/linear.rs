use crate::autograd::{Graph, NodeId};
use crate::error::TapegradError;
use crate::nn::init::linear_uniform;
use crate::nn::module::Module;
use crate::nn::parameter::Parameter;
use crate::tensor::Tensor;
use rand::Rng;

/// Applies a linear transformation to the incoming data: `y = x·Wᵗ + b`.
///
/// The weight has shape `[out_features, in_features]` and the optional bias
/// `[out_features]`. Inputs are `[batch, in_features]`.
#[derive(Debug, Clone)]
pub struct Linear {
    weight: Parameter,
    bias: Option<Parameter>,
    in_features: usize,
    out_features: usize,
}

impl Linear {
    /// Creates a new Linear layer with weights and bias drawn from
    /// `U(-1/√in_features, 1/√in_features)`.
    ///
    /// # Arguments
    /// * `in_features` - Size of each input sample.
    /// * `out_features` - Size of each output sample.
    /// * `has_bias` - If `true`, the layer will learn an additive bias.
    /// * `rng` - Source of randomness; seed it for reproducible runs.
    pub fn new<R: Rng + ?Sized>(
        in_features: usize,
        out_features: usize,
        has_bias: bool,
        rng: &mut R,
    ) -> Result<Self, TapegradError> {
        let weight = linear_uniform(&[out_features, in_features], in_features, rng)?;
        let bias = if has_bias {
            Some(Parameter::new(linear_uniform(&[out_features], in_features, rng)?))
        } else {
            None
        };
        Ok(Linear {
            weight: Parameter::new(weight),
            bias,
            in_features,
            out_features,
        })
    }

    /// Builds a layer around explicit weight and bias values.
    ///
    /// # Errors
    /// `RankMismatch` if `weight` is not rank 2, `ShapeMismatch` if `bias` is
    /// not `[out_features]`.
    pub fn from_tensors(weight: Tensor, bias: Option<Tensor>) -> Result<Self, TapegradError> {
        let (out_features, in_features) = weight.dims2("Linear::from_tensors")?;
        if let Some(b) = &bias {
            if b.shape() != [out_features] {
                return Err(TapegradError::ShapeMismatch {
                    expected: vec![out_features],
                    actual: b.shape().to_vec(),
                    operation: "Linear::from_tensors (bias)".to_string(),
                });
            }
        }
        Ok(Linear {
            weight: Parameter::new(weight),
            bias: bias.map(Parameter::new),
            in_features,
            out_features,
        })
    }

    pub fn weight(&self) -> &Parameter {
        &self.weight
    }

    pub fn bias(&self) -> Option<&Parameter> {
        self.bias.as_ref()
    }

    pub fn in_features(&self) -> usize {
        self.in_features
    }

    pub fn out_features(&self) -> usize {
        self.out_features
    }
}

impl Module for Linear {
    fn forward(&self, graph: &mut Graph, input: NodeId) -> Result<NodeId, TapegradError> {
        let weight = graph.param(&self.weight);
        let bias = self.bias.as_ref().map(|b| graph.param(b));
        graph.linear(input, weight, bias)
    }

    fn named_parameters(&self) -> Vec<(String, Parameter)> {
        let mut params = vec![("weight".to_string(), self.weight.clone())];
        if let Some(bias) = &self.bias {
            params.push(("bias".to_string(), bias.clone()));
        }
        params
    }
}

#[cfg(test)]
#[path = "linear_test.rs"]
mod tests;

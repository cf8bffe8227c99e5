//! Deployment topology: the todo table, the two handler functions and the REST
//! API that routes to them.
//!
//! [`todo_stack`] describes the stack as plain data and [`StackSpec::template`]
//! renders it as a CloudFormation template. Nothing here runs at request time.

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::common::{ID_ATTRIBUTE, TABLE_NAME_ENV};

pub const LAMBDA_RUNTIME: &str = "provided.al2023";
pub const LAMBDA_HANDLER: &str = "bootstrap";
pub const ASSET_BUCKET_PARAMETER: &str = "AssetBucket";
pub const STAGE_NAME: &str = "prod";

const BASIC_EXECUTION_POLICY: &str =
    "arn:${AWS::Partition}:iam::aws:policy/service-role/AWSLambdaBasicExecutionRole";

/// Actions granted for read and write access to the table.
pub const TABLE_READ_WRITE_ACTIONS: [&str; 12] = [
    "dynamodb:BatchGetItem",
    "dynamodb:GetRecords",
    "dynamodb:GetShardIterator",
    "dynamodb:Query",
    "dynamodb:GetItem",
    "dynamodb:Scan",
    "dynamodb:ConditionCheckItem",
    "dynamodb:BatchWriteItem",
    "dynamodb:PutItem",
    "dynamodb:UpdateItem",
    "dynamodb:DeleteItem",
    "dynamodb:DescribeTable",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttributeType {
    #[serde(rename = "S")]
    String,
    #[serde(rename = "N")]
    Number,
    #[serde(rename = "B")]
    Binary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillingMode {
    PayPerRequest,
    Provisioned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    pub logical_id: &'static str,
    pub partition_key: &'static str,
    pub partition_key_type: AttributeType,
    pub billing_mode: BillingMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSpec {
    pub logical_id: &'static str,
    /// Cargo binary that provides the `bootstrap` executable.
    pub binary: &'static str,
    /// Environment variable through which the function learns the table name.
    pub table_env: &'static str,
    pub table_read_write: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSpec {
    pub method: HttpMethod,
    pub function: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSpec {
    pub logical_id: &'static str,
    pub path_part: &'static str,
    pub routes: Vec<RouteSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestApiSpec {
    pub logical_id: &'static str,
    pub name: &'static str,
    pub resources: Vec<ResourceSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackSpec {
    pub description: &'static str,
    pub table: TableSpec,
    pub functions: Vec<FunctionSpec>,
    pub api: RestApiSpec,
}

pub fn todo_stack() -> StackSpec {
    StackSpec {
        description: "Todo list API: DynamoDB table, list/create Lambda handlers, REST API",
        table: TableSpec {
            logical_id: "TodoTable",
            partition_key: ID_ATTRIBUTE,
            partition_key_type: AttributeType::String,
            billing_mode: BillingMode::PayPerRequest,
        },
        functions: vec![
            FunctionSpec {
                logical_id: "ListTodosHandler",
                binary: "list-todos",
                table_env: TABLE_NAME_ENV,
                table_read_write: true,
            },
            FunctionSpec {
                logical_id: "AddTodoHandler",
                binary: "add-todo",
                table_env: TABLE_NAME_ENV,
                table_read_write: true,
            },
        ],
        api: RestApiSpec {
            logical_id: "TodoApi",
            name: "Todo Service",
            resources: vec![ResourceSpec {
                logical_id: "TodoApiTodos",
                path_part: "todos",
                routes: vec![
                    RouteSpec {
                        method: HttpMethod::Get,
                        function: "ListTodosHandler",
                    },
                    RouteSpec {
                        method: HttpMethod::Post,
                        function: "AddTodoHandler",
                    },
                ],
            }],
        },
    }
}

impl StackSpec {
    pub fn function(&self, logical_id: &str) -> Option<&FunctionSpec> {
        self.functions.iter().find(|val| val.logical_id == logical_id)
    }

    /// Renders the stack as a CloudFormation template.
    pub fn template(&self) -> Value {
        let mut resources = Map::new();

        resources.insert(self.table.logical_id.into(), self.table.resource());

        for function in &self.functions {
            let role_id = format!("{}ServiceRole", function.logical_id);
            let policy_id = format!("{}ServiceRoleDefaultPolicy", function.logical_id);

            resources.insert(role_id.clone(), lambda_role());
            if function.table_read_write {
                resources.insert(
                    policy_id.clone(),
                    table_policy(&policy_id, &role_id, self.table.logical_id),
                );
            }
            resources.insert(
                function.logical_id.into(),
                function.resource(&role_id, &policy_id, self.table.logical_id),
            );
        }

        let api = &self.api;
        resources.insert(
            api.logical_id.into(),
            json!({
                "Type": "AWS::ApiGateway::RestApi",
                "Properties": { "Name": api.name }
            }),
        );

        let mut method_ids = Vec::new();
        for resource in &api.resources {
            resources.insert(
                resource.logical_id.into(),
                json!({
                    "Type": "AWS::ApiGateway::Resource",
                    "Properties": {
                        "ParentId": { "Fn::GetAtt": [api.logical_id, "RootResourceId"] },
                        "PathPart": resource.path_part,
                        "RestApiId": { "Ref": api.logical_id }
                    }
                }),
            );

            for route in &resource.routes {
                let method = method_name(route.method);
                let method_id = format!("{}{}", resource.logical_id, pascal_case(method));
                resources.insert(
                    method_id.clone(),
                    route_method(api.logical_id, resource.logical_id, route),
                );
                resources.insert(
                    format!("{}Permission", method_id),
                    route_permission(api.logical_id, resource.path_part, route),
                );
                method_ids.push(method_id);
            }
        }

        let deployment_id = format!("{}Deployment", api.logical_id);
        resources.insert(
            deployment_id.clone(),
            json!({
                "Type": "AWS::ApiGateway::Deployment",
                "Properties": { "RestApiId": { "Ref": api.logical_id } },
                "DependsOn": method_ids
            }),
        );
        let stage_id = format!("{}DeploymentStage{}", api.logical_id, pascal_case(STAGE_NAME));
        resources.insert(
            stage_id,
            json!({
                "Type": "AWS::ApiGateway::Stage",
                "Properties": {
                    "DeploymentId": { "Ref": deployment_id },
                    "RestApiId": { "Ref": api.logical_id },
                    "StageName": STAGE_NAME
                }
            }),
        );

        json!({
            "AWSTemplateFormatVersion": "2010-09-09",
            "Description": self.description,
            "Parameters": {
                ASSET_BUCKET_PARAMETER: {
                    "Type": "String",
                    "Description": "S3 bucket holding the zipped bootstrap binaries"
                }
            },
            "Resources": resources,
            "Outputs": {
                format!("{}Endpoint", api.logical_id): {
                    "Value": {
                        "Fn::Sub": format!(
                            "https://${{{}}}.execute-api.${{AWS::Region}}.${{AWS::URLSuffix}}/{}/",
                            api.logical_id, STAGE_NAME
                        )
                    }
                }
            }
        })
    }
}

impl TableSpec {
    fn resource(&self) -> Value {
        json!({
            "Type": "AWS::DynamoDB::Table",
            "Properties": {
                "AttributeDefinitions": [
                    { "AttributeName": self.partition_key, "AttributeType": self.partition_key_type }
                ],
                "KeySchema": [
                    { "AttributeName": self.partition_key, "KeyType": "HASH" }
                ],
                "BillingMode": self.billing_mode
            },
            "UpdateReplacePolicy": "Retain",
            "DeletionPolicy": "Retain"
        })
    }
}

impl FunctionSpec {
    /// Key of the zipped binary inside the asset bucket.
    pub fn asset_key(&self) -> String {
        format!("{}/bootstrap.zip", self.binary)
    }

    fn resource(&self, role_id: &str, policy_id: &str, table_id: &str) -> Value {
        let mut depends_on = Vec::new();
        if self.table_read_write {
            depends_on.push(policy_id);
        }
        depends_on.push(role_id);

        json!({
            "Type": "AWS::Lambda::Function",
            "Properties": {
                "Code": {
                    "S3Bucket": { "Ref": ASSET_BUCKET_PARAMETER },
                    "S3Key": self.asset_key()
                },
                "Role": { "Fn::GetAtt": [role_id, "Arn"] },
                "Environment": {
                    "Variables": { self.table_env: { "Ref": table_id } }
                },
                "Handler": LAMBDA_HANDLER,
                "Runtime": LAMBDA_RUNTIME
            },
            "DependsOn": depends_on
        })
    }
}

fn lambda_role() -> Value {
    json!({
        "Type": "AWS::IAM::Role",
        "Properties": {
            "AssumeRolePolicyDocument": {
                "Statement": [{
                    "Action": "sts:AssumeRole",
                    "Effect": "Allow",
                    "Principal": { "Service": "lambda.amazonaws.com" }
                }],
                "Version": "2012-10-17"
            },
            "ManagedPolicyArns": [{ "Fn::Sub": BASIC_EXECUTION_POLICY }]
        }
    })
}

fn table_policy(policy_id: &str, role_id: &str, table_id: &str) -> Value {
    json!({
        "Type": "AWS::IAM::Policy",
        "Properties": {
            "PolicyDocument": {
                "Statement": [{
                    "Action": TABLE_READ_WRITE_ACTIONS,
                    "Effect": "Allow",
                    "Resource": [{ "Fn::GetAtt": [table_id, "Arn"] }]
                }],
                "Version": "2012-10-17"
            },
            "PolicyName": policy_id,
            "Roles": [{ "Ref": role_id }]
        }
    })
}

fn route_method(api_id: &str, resource_id: &str, route: &RouteSpec) -> Value {
    json!({
        "Type": "AWS::ApiGateway::Method",
        "Properties": {
            "HttpMethod": route.method,
            "ResourceId": { "Ref": resource_id },
            "RestApiId": { "Ref": api_id },
            "AuthorizationType": "NONE",
            "Integration": {
                // Lambda proxy integrations are always invoked with POST.
                "IntegrationHttpMethod": "POST",
                "Type": "AWS_PROXY",
                "Uri": {
                    "Fn::Sub": format!(
                        "arn:${{AWS::Partition}}:apigateway:${{AWS::Region}}:lambda:path/2015-03-31/functions/${{{}.Arn}}/invocations",
                        route.function
                    )
                }
            }
        }
    })
}

fn route_permission(api_id: &str, path_part: &str, route: &RouteSpec) -> Value {
    json!({
        "Type": "AWS::Lambda::Permission",
        "Properties": {
            "Action": "lambda:InvokeFunction",
            "FunctionName": { "Fn::GetAtt": [route.function, "Arn"] },
            "Principal": "apigateway.amazonaws.com",
            "SourceArn": {
                "Fn::Sub": format!(
                    "arn:${{AWS::Partition}}:execute-api:${{AWS::Region}}:${{AWS::AccountId}}:${{{}}}/*/{}/{}",
                    api_id,
                    method_name(route.method),
                    path_part
                )
            }
        }
    })
}

fn method_name(method: HttpMethod) -> &'static str {
    match method {
        HttpMethod::Get => "GET",
        HttpMethod::Post => "POST",
    }
}

fn pascal_case(word: &str) -> String {
    let lower = word.to_ascii_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
